/* 📖 # Why use a separate file for these error tests?

The Debug output of HalkitError is checked with snapshot assertions. Keeping those snapshots
out of the main error module keeps that module readable.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{HalkitError, HalkitResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;
    use std::io;
    use tracing::span;
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_error_from_message() {
        let error = HalkitError::message("something went wrong");

        match error.kind() {
            ErrorKind::Message { message } => {
                assert_eq!(message, "something went wrong");
            }
            _ => panic!("Expected Message variant"),
        }
    }

    #[test]
    fn test_error_wraps_foreign_error() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "bad bytes");
        let error = HalkitError::wrap(io_err);

        assert!(matches!(error.kind(), ErrorKind::Wrapped { .. }));
        assert_eq!(error.to_string(), "bad bytes");
        assert_eq!(error.root_cause().to_string(), "bad bytes");
    }

    #[test]
    fn test_error_context_attachment() {
        let error = HalkitError::message("original error")
            .context("first context")
            .context("second context");

        assert_eq!(error.get_context().len(), 2);
        assert_eq!(error.get_context()[0], "first context");
        assert_eq!(error.get_context()[1], "second context");
    }

    #[test]
    fn test_error_with_context_lazy_evaluation() {
        let mut called = false;
        let error = HalkitError::message("error").with_context(|| {
            called = true;
            "lazy context".to_string()
        });

        assert!(called);
        assert_eq!(error.get_context()[0], "lazy context");
    }

    #[test]
    fn test_error_display_message_only() {
        let error = HalkitError::message("test message");
        assert_eq!(error.to_string(), "test message");
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = HalkitError::message("root error")
            .context("first")
            .context("second");
        assert_eq!(error.to_string(), "second: first: root error");
    }

    #[test]
    fn test_error_source_follows_cause() {
        let error = HalkitError::message("outer").caused_by(HalkitError::message("inner"));
        assert_eq!(error.source().map(|s| s.to_string()), Some("inner".to_string()));
        assert_eq!(error.root_cause().to_string(), "inner");
        assert_eq!(error.cause().map(|c| c.to_string()), Some("inner".to_string()));
    }

    #[test]
    fn test_error_source_message() {
        let error = HalkitError::message("test");
        assert!(error.source().is_none());
        assert_eq!(error.root_cause().to_string(), "test");
    }

    #[test]
    fn test_result_ext_context_error() {
        let result: HalkitResult<i32> = Err(Box::new(HalkitError::message("original")));
        let err = result.context("operation failed").unwrap_err();
        assert_eq!(err.to_string(), "operation failed: original");
    }

    #[test]
    fn test_result_ext_with_context_success() {
        let result: HalkitResult<i32> = Ok(42);
        let final_result = result.with_context(|| "operation failed".to_string());
        assert_eq!(final_result.unwrap(), 42);
    }

    #[test]
    fn test_debug_pretty_print_format() {
        let error = HalkitError::message("something went wrong")
            .context("while encoding response")
            .context("for GET /orders");

        expect![[r#"
            something went wrong
            ├─ while encoding response
            └─ for GET /orders
        "#]]
        .assert_debug_eq(&error);
    }

    #[test]
    fn test_debug_nested_errors() {
        let error_1 = HalkitError::message("error 1").context("context 1");
        let error_2 = HalkitError::message("error 2")
            .context("context 2")
            .caused_by(error_1);
        let error_3 = HalkitError::message("error 3")
            .context("context 3")
            .caused_by(error_2);

        expect![[r#"
            error 3
            ├─ context 3
            └─ cause: error 2
               ├─ context 2
               └─ cause: error 1
                  └─ context 1
        "#]]
        .assert_debug_eq(&error_3);
    }

    #[test]
    fn test_debug_includes_span_trace_when_captured() {
        let subscriber = tracing_subscriber::registry().with(ErrorLayer::default());

        let debug = tracing::subscriber::with_default(subscriber, || {
            let operation_span = span!(tracing::Level::INFO, "render_error", status = 503);
            let _guard = operation_span.enter();
            format!("{:?}", HalkitError::message("upstream unavailable"))
        });

        assert!(debug.starts_with("upstream unavailable\nTrace: "));
        assert!(debug.contains("render_error"));
        assert!(debug.contains("status=503"));
    }

    #[test]
    fn test_debug_omits_span_trace_without_subscriber() {
        let debug = format!("{:?}", HalkitError::message("plain"));
        assert_eq!(debug, "plain");
    }
}
