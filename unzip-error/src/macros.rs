use crate::StackError;

/// Возврат `Err(StackError)` из текущей функции.
///
/// `bail!(err)` принимает любой тип с [`ErrorExt`](crate::ErrorExt);
/// `bail!(code, "fmt", args..)` строит [`GenericError`](crate::GenericError).
///
/// ```ignore
/// fn pick(paths: &[PathBuf]) -> UnzipResult<&PathBuf> {
///     let Some(first) = paths.first() else {
///         bail!(StatusCode::InvalidArgs, "FOFN is empty");
///     };
///     Ok(first)
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($crate::StackError::from($err))
    };
    ($code:expr, $($fmt:tt)+) => {
        return ::core::result::Result::Err($crate::StackError::new(
            $crate::GenericError::new($code, format!($($fmt)+)),
        ))
    };
}

/// `bail!`, если условие ложно.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($rest:tt)+) => {
        if !$cond {
            $crate::bail!($($rest)+);
        }
    };
}

/// Пояснения к ошибке прямо на `Result`.
pub trait ResultExt<T> {
    fn context(
        self,
        msg: impl Into<String>,
    ) -> Result<T, StackError>;

    /// Пояснение строится только при ошибке.
    fn with_context<S: Into<String>>(
        self,
        msg: impl FnOnce() -> S,
    ) -> Result<T, StackError>;
}

impl<T, E: Into<StackError>> ResultExt<T> for Result<T, E> {
    // `match` вместо `map_err`: иначе `Location::caller()` укажет на замыкание.
    #[track_caller]
    fn context(
        self,
        msg: impl Into<String>,
    ) -> Result<T, StackError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().context(msg)),
        }
    }

    #[track_caller]
    fn with_context<S: Into<String>>(
        self,
        msg: impl FnOnce() -> S,
    ) -> Result<T, StackError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().context(msg())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
