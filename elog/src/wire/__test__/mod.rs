#[cfg(test)]
mod __test__ {
    use crate::codec::ArgValue;
    use crate::error::ElogError;
    use crate::log::Log;
    use crate::wire::{read_log, write_log};

    #[test]
    fn round_trips_types_tracks_and_events() {
        let mut log = Log::init(16);
        let t = log.register_type("n=%d s=%s", None);
        let track = log.register_track("worker-0");
        log.emit(t, track, &[ArgValue::U32(7), ArgValue::Str("hi".into())]);
        log.emit(t, track, &[ArgValue::U32(8), ArgValue::Str("bye".into())]);

        let mut buf = Vec::new();
        log.serialize(&mut buf).unwrap();

        let mut cursor = std::io::Cursor::new(&buf);
        let reloaded = read_log(&mut cursor).unwrap();

        assert_eq!(reloaded.capacity(), 16);
        let events = reloaded.peek();
        assert_eq!(events.len(), 2);
        assert_eq!(
            reloaded.format_event(&events[0]),
            log.format_event(&log.peek()[0])
        );
        assert_eq!(
            reloaded.format_event(&events[1]),
            log.format_event(&log.peek()[1])
        );
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut buf = vec![b'n', b'o', b'p', b'e', b'!', b'!', b'!'];
        buf.extend_from_slice(&0u32.to_le_bytes());
        let mut cursor = std::io::Cursor::new(&buf);
        let err = read_log(&mut cursor).unwrap_err();
        assert!(matches!(err, ElogError::BadMagic { .. }));
    }

    #[test]
    fn truncated_input_is_an_error_not_a_panic() {
        let mut log = Log::init(4);
        let t = log.register_type("n=%d", None);
        log.emit(t, 0, &[ArgValue::U32(1)]);
        let mut buf = Vec::new();
        log.serialize(&mut buf).unwrap();
        buf.truncate(buf.len() - 2);
        let mut cursor = std::io::Cursor::new(&buf);
        assert!(read_log(&mut cursor).is_err());
    }

    #[test]
    fn enum_arguments_round_trip_through_the_envelope() {
        let mut log = Log::init(8);
        let t = log.register_type_with_descriptor("if=%s", "t", None);
        log.emit(t, 0, &[ArgValue::Enum("eth0".into())]);

        let mut buf = Vec::new();
        log.serialize(&mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(&buf);
        let reloaded = read_log(&mut cursor).unwrap();

        assert_eq!(reloaded.peek()[0].args, vec![ArgValue::Enum("eth0".into())]);
    }

    #[test]
    fn write_log_output_starts_with_the_magic_string() {
        let mut log = Log::init(4);
        let mut buf = Vec::new();
        write_log(&log, &mut buf).unwrap();
        assert_eq!(&buf[..7], b"elog v0");
        // serialize_time sample is only taken by Log::serialize, not by
        // calling write_log directly; that's fine for this check, which
        // only looks at the magic.
        log.serialize(&mut Vec::new()).unwrap();
    }
}
