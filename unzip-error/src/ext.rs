use std::{any::Any, error::Error};

use crate::StatusCode;

/// Общий интерфейс ошибок `unzip-io` поверх `std::error::Error`.
///
/// Трейт object-safe: [`StackError`](crate::StackError) хранит корневую
/// ошибку как `dyn ErrorExt`. Реализация обязана дать только
/// [`as_any`](Self::as_any); остальное имеет разумные значения по умолчанию.
pub trait ErrorExt: Error + Send + Sync + 'static {
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    fn as_any(&self) -> &dyn Any;

    /// Строка для stderr CLI. Внутренние сбои не раскрываются.
    fn user_message(&self) -> String {
        if self.status_code().is_internal() {
            "Internal error".to_string()
        } else {
            self.to_string()
        }
    }

    fn log_message(&self) -> String {
        format!("{self:?}")
    }

    /// Поля для структурированного лога; типы ошибок добавляют свои.
    fn log_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("error_type", self.type_name()),
            ("status_code", self.status_code().to_string()),
        ]
    }

    /// Короткое имя типа, например `GatewayError`.
    fn type_name(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }
}
