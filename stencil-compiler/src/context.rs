//! Conversion of a [`RenderContext`] into a Tera context.

use stencil_core::RenderContext;

use crate::error::RenderError;

/// Convert to a [`tera::Context`] for rendering.
pub fn to_tera_context(context: &RenderContext) -> Result<tera::Context, RenderError> {
    tera::Context::from_serialize(context).map_err(RenderError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_context_converts() {
        let ctx = to_tera_context(&RenderContext::new()).expect("context conversion");
        assert!(ctx.get("anything").is_none());
    }

    #[test]
    fn nested_values_survive_conversion() {
        let mut ctx = RenderContext::new();
        ctx.insert("user".to_string(), json!({ "name": "ada", "roles": ["admin"] }));
        let tera_ctx = to_tera_context(&ctx).expect("context conversion");
        assert_eq!(tera_ctx.get("user"), Some(&json!({ "name": "ada", "roles": ["admin"] })));
    }
}
