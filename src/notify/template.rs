//! Branded HTML e-mail template

use crate::utils::NotifyError;
use minijinja::{context, Environment};

/// The `.html` suffix turns on minijinja's HTML auto-escaping
const TEMPLATE_NAME: &str = "notification.html";

const NOTIFICATION_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="margin: 0; padding: 20px; background-color: #F8FAFC;">
    <div style="max-width: 600px; margin: 0 auto; font-family: Arial, sans-serif;">
      <div style="background: linear-gradient(135deg, #3B82F6, #6366F1); padding: 30px; text-align: center; border-radius: 10px 10px 0 0;">
        <h1 style="color: white; margin: 0;">&#x1F6E1;&#xFE0F; Zertifikat-W&auml;chter</h1>
      </div>
      <div style="background: white; padding: 30px; border: 1px solid #E2E8F0; border-radius: 0 0 10px 10px;">
        <h2 style="color: #0F172A;">{{ subject }}</h2>
        <p style="color: #64748B; line-height: 1.6;">{{ body }}</p>
        {% if server %}
        <div style="margin-top: 30px; padding: 20px; background: #D1FAE5; border-radius: 8px; border-left: 4px solid #10B981;">
          <p style="margin: 0; color: #065F46; font-weight: bold;">&#x2705; SMTP funktioniert!</p>
          <p style="margin: 10px 0 0 0; color: #064E3B; font-size: 14px;">Server: {{ server }}</p>
        </div>
        {% endif %}
      </div>
    </div>
  </body>
</html>
"#;

/// Render the branded HTML body.
///
/// `server` (`host:port`) adds the delivery confirmation box; pass `None` to
/// leave it out.
pub fn render_html(subject: &str, body: &str, server: Option<&str>) -> Result<String, NotifyError> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, NOTIFICATION_TEMPLATE)
        .map_err(|e| NotifyError::TemplateError {
            message: e.to_string(),
        })?;

    let template = env
        .get_template(TEMPLATE_NAME)
        .map_err(|e| NotifyError::TemplateError {
            message: e.to_string(),
        })?;

    template
        .render(context! {
            subject => subject,
            body => body,
            server => server,
        })
        .map_err(|e| NotifyError::TemplateError {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_server_box() {
        let html = render_html("Hello", "Test-E-Mail", Some("smtp.example.com:587")).unwrap();
        assert!(html.contains("<h2 style=\"color: #0F172A;\">Hello</h2>"));
        assert!(html.contains("Server: smtp.example.com:587"));
        assert!(html.contains("SMTP funktioniert!"));
    }

    #[test]
    fn test_render_without_server() {
        let html = render_html("Hello", "Body", None).unwrap();
        assert!(!html.contains("SMTP funktioniert!"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let html = render_html("<b>subject</b>", "<script>x</script>", None).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
