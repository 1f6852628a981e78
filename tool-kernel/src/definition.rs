//! Declarations a tool author provides.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use tool_activities::{Activity, ActivityResult};
use tool_config::FieldSpec;
use tracing::trace;

/// Static declaration of a tool type.
///
/// Activities are listed explicitly rather than discovered, so a tool only
/// ever exposes what [`ToolDefinition::activities`] returns. A tool that
/// extends another reuses the other's lists and declares its own
/// [`ToolDefinition::CLASS_NAME`].
///
/// # Examples
///
/// ```
/// use tool_activities::{Activity, ActivityResult};
/// use tool_config::FieldSpec;
/// use tool_kernel::{BaseTool, ToolDefinition};
///
/// struct Calculator;
///
/// impl ToolDefinition for Calculator {
///     const CLASS_NAME: &'static str = "Calculator";
///
///     fn fields() -> Vec<FieldSpec> {
///         vec![FieldSpec::env("precision").with_default(2)]
///     }
///
///     fn activities() -> ActivityResult<Vec<Activity>> {
///         Ok(vec![
///             Activity::builder("calculate")
///                 .description("Evaluates an arithmetic expression")
///                 .build()?,
///         ])
///     }
/// }
///
/// let tool = BaseTool::builder::<Calculator>("/opt/tools/calculator/tool.rs")
///     .build()
///     .unwrap();
/// assert_eq!(tool.name(), "Calculator");
/// assert!(tool.find_activity("calculate").is_some());
/// ```
pub trait ToolDefinition: 'static {
    /// Identity of the concrete tool type; the default tool name.
    const CLASS_NAME: &'static str;

    /// Configuration fields the tool accepts.
    fn fields() -> Vec<FieldSpec> {
        Vec::new()
    }

    /// Activities the tool exposes, in the order they should be listed.
    ///
    /// Evaluated once per type; later builds reuse the first result.
    ///
    /// # Errors
    ///
    /// Returns the declaration error of the first malformed activity.
    fn activities() -> ActivityResult<Vec<Activity>>;
}

type DeclarationCache = Mutex<HashMap<TypeId, ActivityResult<Vec<Activity>>>>;

/// Returns the activity table of `T`, evaluating [`ToolDefinition::activities`]
/// on first use only.
pub(crate) fn declared_activities<T: ToolDefinition>() -> ActivityResult<Vec<Activity>> {
    static DECLARED: OnceLock<DeclarationCache> = OnceLock::new();
    let cache = DECLARED.get_or_init(Mutex::default);
    let id = TypeId::of::<T>();

    if let Some(declared) = cache.lock().unwrap_or_else(PoisonError::into_inner).get(&id) {
        return declared.clone();
    }

    // The lock is not held while the declaration runs.
    let declared = T::activities();
    trace!(class = T::CLASS_NAME, "activity declarations evaluated");
    cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id)
        .or_insert(declared)
        .clone()
}
