//! Operation boundary macros
//!
//! Every engine command logs exactly one start event and one end (or
//! end_error) event. Field names come from `recipebook_core_types::schema`.

/// Log the start of an operation
///
/// ```
/// # use recipebook_core::log_op_start;
/// log_op_start!("recipe_create");
/// log_op_start!("recipe_edit", recipe_id = "r1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use recipebook_core::log_op_end;
/// log_op_end!("recipe_create", duration_ms = 3);
/// log_op_end!("recipe_list", duration_ms = 1, result_len = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed operation
///
/// Accepts anything convertible into `ExError`. Validation failures are
/// logged at `warn` with the failed categories; everything else at `error`.
///
/// ```
/// # use recipebook_core::{log_op_error, errors::RecipeBookError};
/// let err = RecipeBookError::RecipeNotFound { recipe_id: "r1".to_string() };
/// log_op_error!("recipe_show", err, duration_ms = 2);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        match ex_err.report() {
            Some(report) => tracing::warn!(
                component = module_path!(),
                op = $op,
                event = $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                failed_categories = %report.category_list(),
                $($field)*
            ),
            None => tracing::error!(
                component = module_path!(),
                op = $op,
                event = $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                $($field)*
            ),
        }
    }};
}
