/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a `Result` in the binary's top level, or logs the error with
/// `$context` and exits with status 1.
#[macro_export]
macro_rules! exit_on_error {
    ($expr:expr, $context:literal) => {
        match $expr {
            Ok(value) => value,
            Err(err) => {
                log::error!(concat!($context, ": {}"), err);
                std::process::exit(1)
            }
        }
    };
}
