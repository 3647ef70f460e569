mod tests {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::rc::Rc;

    use embassy_time::Instant;
    use opc_pixel_client::{
        Animation, BLACK, Error, OpcClient, Rgb, StripCanvas, Transport,
        protocol::CMD_SET_PIXEL_COLORS, protocol::CMD_SYSTEM_EXCLUSIVE,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    /// Transport that records every packet and can inject write failures.
    #[derive(Clone, Default)]
    struct RecordingTransport {
        open: Rc<Cell<bool>>,
        opens: Rc<Cell<usize>>,
        fail_writes: Rc<Cell<usize>>,
        writes: Rc<RefCell<Vec<Vec<u8>>>>,
    }

    impl RecordingTransport {
        fn commands(&self) -> Vec<u8> {
            self.writes.borrow().iter().map(|packet| packet[1]).collect()
        }
    }

    impl Transport for RecordingTransport {
        fn open(&mut self) -> io::Result<()> {
            if !self.open.get() {
                self.opens.set(self.opens.get() + 1);
                self.open.set(true);
            }
            Ok(())
        }

        fn write_all(&mut self, packet: &[u8]) -> io::Result<()> {
            if self.fail_writes.get() > 0 {
                self.fail_writes.set(self.fail_writes.get() - 1);
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected"));
            }
            self.writes.borrow_mut().push(packet.to_vec());
            Ok(())
        }

        fn close(&mut self) {
            self.open.set(false);
        }

        fn is_open(&self) -> bool {
            self.open.get()
        }
    }

    /// Animation that never changes anything.
    struct Idle;

    impl Animation for Idle {
        fn reset(&mut self, _canvas: &mut StripCanvas<'_>) {}

        fn draw(&mut self, _now: Instant, _canvas: &mut StripCanvas<'_>) -> Result<bool, Error> {
            Ok(false)
        }
    }

    /// Animation that repaints the whole strip every tick.
    struct Solid(Rgb);

    impl Animation for Solid {
        fn reset(&mut self, _canvas: &mut StripCanvas<'_>) {}

        fn draw(&mut self, _now: Instant, canvas: &mut StripCanvas<'_>) -> Result<bool, Error> {
            canvas.fill(self.0);
            Ok(true)
        }
    }

    /// Animation that marks its first pixel during `reset` and then idles.
    struct ResetMarker(Rgb);

    impl Animation for ResetMarker {
        fn reset(&mut self, canvas: &mut StripCanvas<'_>) {
            canvas.set_pixel(0, self.0).unwrap();
        }

        fn draw(&mut self, _now: Instant, _canvas: &mut StripCanvas<'_>) -> Result<bool, Error> {
            Ok(false)
        }
    }

    #[test]
    fn test_unchanged_tick_writes_nothing() {
        let probe = RecordingTransport::default();
        let mut client = OpcClient::with_transport(probe.clone());
        let device = client.add_device();
        for line in 0..3u8 {
            let strip = client.add_strip(device, line, 8).unwrap();
            client.set_animation(strip, Idle);
        }

        assert!(!client.animate(Instant::from_millis(0)).unwrap());
        assert!(probe.writes.borrow().is_empty());
        assert_eq!(probe.opens.get(), 0);
    }

    #[test]
    fn test_single_change_flushes_once() {
        let probe = RecordingTransport::default();
        let mut client = OpcClient::with_transport(probe.clone());
        let device = client.add_device();
        let idle_a = client.add_strip(device, 0, 8).unwrap();
        let solid = client.add_strip(device, 1, 8).unwrap();
        let idle_b = client.add_strip(device, 2, 8).unwrap();
        client.set_animation(idle_a, Idle);
        client.set_animation(solid, Solid(RED));
        client.set_animation(idle_b, Idle);

        assert!(client.animate(Instant::from_millis(0)).unwrap());
        // One fresh open: firmware config first, then exactly one frame.
        assert_eq!(probe.commands(), [CMD_SYSTEM_EXCLUSIVE, CMD_SET_PIXEL_COLORS]);

        assert!(client.animate(Instant::from_millis(100)).unwrap());
        assert_eq!(
            probe.commands(),
            [
                CMD_SYSTEM_EXCLUSIVE,
                CMD_SET_PIXEL_COLORS,
                CMD_SET_PIXEL_COLORS
            ]
        );
        assert_eq!(probe.opens.get(), 1);
    }

    #[test]
    fn test_detach_clears_the_strip() {
        let probe = RecordingTransport::default();
        let mut client = OpcClient::with_transport(probe);
        let device = client.add_device();
        let strip = client.add_strip(device, 0, 3).unwrap();
        client.set_animation(strip, Solid(RED));
        client.animate(Instant::from_millis(0)).unwrap();
        for index in 0..3 {
            assert_eq!(client.pixel_color(strip, index).unwrap(), RED);
        }

        client.clear_animation(strip);
        assert!(client.strip(strip).animation().is_none());
        for index in 0..3 {
            assert_eq!(client.pixel_color(strip, index).unwrap(), BLACK);
        }
    }

    #[test]
    fn test_reattach_clears_then_resets() {
        let probe = RecordingTransport::default();
        let mut client = OpcClient::with_transport(probe);
        let device = client.add_device();
        let strip = client.add_strip(device, 0, 3).unwrap();
        client.set_animation(strip, Solid(RED));
        client.animate(Instant::from_millis(0)).unwrap();

        client.set_animation(strip, ResetMarker(BLUE));
        assert_eq!(client.pixel_color(strip, 0).unwrap(), BLUE);
        assert_eq!(client.pixel_color(strip, 1).unwrap(), BLACK);
        assert_eq!(client.pixel_color(strip, 2).unwrap(), BLACK);
    }

    #[test]
    fn test_write_failure_closes_then_reopens() {
        let probe = RecordingTransport::default();
        let mut client = OpcClient::with_transport(probe.clone());
        let device = client.add_device();
        let strip = client.add_strip(device, 0, 4).unwrap();
        client.set_animation(strip, Solid(RED));

        client.animate(Instant::from_millis(0)).unwrap();
        assert_eq!(probe.opens.get(), 1);
        assert!(client.is_connected());

        probe.fail_writes.set(1);
        client.animate(Instant::from_millis(50)).unwrap();
        assert!(!client.is_connected());
        assert_eq!(probe.commands(), [CMD_SYSTEM_EXCLUSIVE, CMD_SET_PIXEL_COLORS]);

        client.animate(Instant::from_millis(100)).unwrap();
        assert_eq!(probe.opens.get(), 2);
        assert_eq!(
            probe.commands(),
            [
                CMD_SYSTEM_EXCLUSIVE,
                CMD_SET_PIXEL_COLORS,
                CMD_SYSTEM_EXCLUSIVE,
                CMD_SET_PIXEL_COLORS
            ]
        );
    }

    #[test]
    fn test_toggle_resends_firmware_config() {
        let probe = RecordingTransport::default();
        let mut client = OpcClient::with_transport(probe.clone());
        client.show();
        assert_eq!(probe.commands(), [CMD_SYSTEM_EXCLUSIVE, CMD_SET_PIXEL_COLORS]);

        client.set_dithering(false);
        {
            let writes = probe.writes.borrow();
            let config = writes.last().unwrap();
            assert_eq!(config[1], CMD_SYSTEM_EXCLUSIVE);
            assert_eq!(config[8], 0x03);
        }

        // Toggling while closed opens the connection, which already carries
        // the fresh flags; the packet must not go out twice.
        client.close();
        client.set_interpolation(true);
        assert_eq!(probe.opens.get(), 2);
        {
            let writes = probe.writes.borrow();
            let config = writes.last().unwrap();
            assert_eq!(config[1], CMD_SYSTEM_EXCLUSIVE);
            assert_eq!(config[8], 0x01);
            assert_eq!(writes.len(), 4);
        }
    }

    #[test]
    fn test_strip_added_after_ticking_regrows_the_frame() {
        let probe = RecordingTransport::default();
        let mut client = OpcClient::with_transport(probe.clone());
        let device = client.add_device();
        let strip = client.add_strip(device, 0, 2).unwrap();
        client.set_animation(strip, Solid(RED));

        client.animate(Instant::from_millis(0)).unwrap();
        assert_eq!(probe.writes.borrow().last().unwrap().len(), 4 + 3 * 2);

        client.add_strip(device, 1, 2).unwrap();
        client.animate(Instant::from_millis(100)).unwrap();
        assert_eq!(probe.writes.borrow().last().unwrap().len(), 4 + 3 * 4);
    }
}
