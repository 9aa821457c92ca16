//! Template rendering with Tera

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("index.html", include_str!("../templates/index.html"))?;
        tera.add_raw_template(
            "suggestions.html",
            include_str!("../templates/suggestions.html"),
        )?;

        Ok(Self { tera })
    }

    /// Render a template with a serializable context
    pub fn render(&self, template: &str, context: &impl Serialize) -> Result<String> {
        let ctx = Context::from_serialize(context)?;
        Ok(self.tera.render(template, &ctx)?)
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SuggestionList;

    #[test]
    fn test_suggestion_rows_escaped() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(
                "suggestions.html",
                &SuggestionList::live(vec!["<b>bold</b>".to_string()]),
            )
            .unwrap();
        assert!(html.contains("&lt;b&gt;bold&lt;&#x2F;b&gt;"));
        assert!(html.contains("🔍"));
    }
}
