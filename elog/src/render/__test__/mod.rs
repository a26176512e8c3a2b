#[cfg(test)]
mod __test__ {
    use crate::codec::ArgValue;
    use crate::render::render_event;

    #[test]
    fn renders_decimal_hex_float_and_string() {
        let out = render_event(
            "n=%d x=%x f=%f s=%s",
            &[
                ArgValue::U32(10),
                ArgValue::U32(255),
                ArgValue::F64(1.5),
                ArgValue::Str("hi".into()),
            ],
        );
        assert_eq!(out, "n=10 x=ff f=1.5 s=hi");
    }

    #[test]
    fn literal_percent_consumes_no_argument() {
        let out = render_event("100%% done, n=%d", &[ArgValue::U32(1)]);
        assert_eq!(out, "100% done, n=1");
    }

    #[test]
    fn width_flags_are_skipped_not_rendered() {
        let out = render_event("n=%05d", &[ArgValue::U32(3)]);
        assert_eq!(out, "n=3");
    }

    #[test]
    fn missing_argument_renders_a_placeholder_instead_of_panicking() {
        let out = render_event("n=%d", &[]);
        assert_eq!(out, "n=<missing>");
    }

    #[test]
    fn enum_argument_renders_its_resolved_string() {
        let out = render_event("if=%s", &[ArgValue::Enum("eth0".into())]);
        assert_eq!(out, "if=eth0");
    }
}
