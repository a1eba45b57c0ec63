use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};

use crate::domain::{PromptAssemblyError, PromptContext, TemplateRenderer};

/// Feature templates only interpolate `{{ name }}`; these open other syntax.
const FORBIDDEN_TOKENS: [&str; 2] = ["{%", "{#"];

static PROMPT_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Fills feature prompt templates with user inputs.
///
/// Input values are inserted as plain text. A value such as `{{ offer }}` or
/// `{% raw %}` typed into a form field ends up in the prompt unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_env() -> &'static Environment<'static> {
    PROMPT_ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env
    })
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(
        &self,
        template: &str,
        context: &PromptContext,
        template_name: &str,
    ) -> Result<String, PromptAssemblyError> {
        if let Some(token) = FORBIDDEN_TOKENS.into_iter().find(|token| template.contains(token)) {
            return Err(PromptAssemblyError::TemplateSyntaxNotAllowed {
                template: template_name.to_string(),
                token: token.to_string(),
            });
        }

        prompt_env().render_str(template, &context.variables).map_err(|err| {
            PromptAssemblyError::TemplateRenderError {
                template: template_name.to_string(),
                reason: err.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, ctx: &PromptContext) -> Result<String, PromptAssemblyError> {
        MinijinjaTemplateRenderer::new().render(template, ctx, "slogans")
    }

    #[test]
    fn renders_variables_verbatim() {
        let ctx = PromptContext::new().with_var("brand", "Tom & Jerry's <Diner>");
        assert_eq!(render("Slogans for {{ brand }}.", &ctx).unwrap(), "Slogans for Tom & Jerry's <Diner>.");
    }

    #[test]
    fn template_syntax_inside_input_values_is_not_interpreted() {
        let ctx = PromptContext::new()
            .with_var("brand", "{{ offer }}")
            .with_var("offer", "{% if x %}free{% endif %} {# note #}");
        let rendered = render("Brand: {{ brand }} / Offer: {{ offer }}", &ctx).unwrap();
        assert_eq!(rendered, "Brand: {{ offer }} / Offer: {% if x %}free{% endif %} {# note #}");
    }

    #[test]
    fn trailing_newline_is_kept() {
        let ctx = PromptContext::new().with_var("brand", "Acme");
        assert_eq!(render("Write for {{ brand }}.\n", &ctx).unwrap(), "Write for Acme.\n");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let err = render("Hello {{ missing }}", &PromptContext::new()).unwrap_err();
        assert!(matches!(err, PromptAssemblyError::TemplateRenderError { template, .. } if template == "slogans"));
    }

    #[test]
    fn block_and_comment_syntax_are_rejected() {
        for (template, expected) in [("{% if x %}y{% endif %}", "{%"), ("{# note #}text", "{#")] {
            let err = render(template, &PromptContext::new()).unwrap_err();
            assert!(matches!(err, PromptAssemblyError::TemplateSyntaxNotAllowed { token, .. } if token == expected));
        }
    }
}
