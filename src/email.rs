//! Digest email: HTML/text rendering and SMTP delivery.

use chrono::Utc;
use lettre::message::{Mailbox, Message, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::config::require_env;
use crate::types::{DigestError, ItemWithSummary, Result, Source};

/// Badge color per source type, inline in the HTML.
fn source_color(source: Source) -> &'static str {
    match source {
        Source::Rss => "#059669",
        Source::HackerNews => "#F97316",
        Source::Reddit => "#EF4444",
        Source::Manual => "#8B5CF6",
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Subject line for today's digest.
pub fn digest_subject() -> String {
    format!("AI/ML/DS digest - {}", Utc::now().format("%Y-%m-%d"))
}

/// HTML body: table-based markup with inline styles so email clients render
/// it consistently. Header, ranked articles with a source badge, footer.
pub fn render_digest_html(items: &[ItemWithSummary]) -> String {
    if items.is_empty() {
        return "<p>No articles in this digest.</p>".to_string();
    }
    let date_str = Utc::now().format("%Y-%m-%d").to_string();

    let mut html = String::new();
    html.push_str(
        "<table width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" \
         style=\"background-color:#f0f2f5; font-family:-apple-system, 'Segoe UI', Roboto, Arial, sans-serif;\">\
         <tr><td align=\"center\" style=\"padding:24px 16px;\">\
         <table cellpadding=\"0\" cellspacing=\"0\" border=\"0\" \
         style=\"max-width:600px; width:100%; background-color:#ffffff; border-radius:12px;\">",
    );
    html.push_str(&format!(
        "<tr><td style=\"background-color:#4F46E5; color:#ffffff; padding:32px 24px;\">\
         <h1 style=\"margin:0 0 8px 0; font-size:24px;\">AI/ML/DS digest</h1>\
         <p style=\"margin:0; font-size:14px;\">Week of {date_str}</p>\
         <p style=\"margin:12px 0 0 0; font-size:14px;\">Your periodic selection of AI, ML and Data Science articles.</p>\
         </td></tr><tr><td style=\"padding:24px;\">"
    ));

    for (idx, entry) in items.iter().enumerate() {
        let rank = idx + 1;
        let title = escape_html(&entry.item.title);
        let url = escape_html(&entry.item.url);
        let summary = escape_html(&entry.summary);
        let label = entry.item.source.label();
        let color = source_color(entry.item.source);
        html.push_str(&format!(
            "<table width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"margin-bottom:24px;\"><tr>\
             <td width=\"48\" style=\"vertical-align:top; padding-right:16px;\">\
             <span style=\"font-size:28px; font-weight:700; color:#4F46E5;\">{rank}</span></td>\
             <td style=\"vertical-align:top;\">\
             <a href=\"{url}\" style=\"color:#1f2937; font-size:16px; font-weight:600; text-decoration:none;\">{title}</a>\
             &nbsp;<span style=\"background-color:{color}; color:#ffffff; font-size:11px; padding:2px 8px; border-radius:12px;\">{label}</span>\
             <p style=\"margin:8px 0 0 0; font-size:14px; line-height:1.5; color:#4b5563;\">{summary}</p>\
             <p style=\"margin:6px 0 0 0;\"><a href=\"{url}\" style=\"font-size:13px; color:#4F46E5;\">Read article</a></p>\
             </td></tr></table>"
        ));
    }

    html.push_str(&format!(
        "</td></tr><tr><td style=\"background-color:#f9fafb; padding:24px; color:#6b7280; font-size:12px;\">\
         Assembled automatically on {date_str} from RSS, Hacker News, Reddit and manual links.\
         </td></tr></table></td></tr></table>"
    ));
    html
}

/// Plain-text alternative body.
pub fn render_digest_text(items: &[ItemWithSummary]) -> String {
    if items.is_empty() {
        return "No articles in this digest.\n".to_string();
    }
    let mut text = format!("AI/ML/DS digest - {}\n\n", Utc::now().format("%Y-%m-%d"));
    for (idx, entry) in items.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} [{}]\n   {}\n   {}\n\n",
            idx + 1,
            entry.item.title,
            entry.item.source.label(),
            entry.item.url,
            entry.summary.trim()
        ));
    }
    text
}

/// SMTP sender for the digest. Connection settings come from the
/// environment: `SMTP_HOST`, `SMTP_USER`, `SMTP_PASS`, `DIGEST_EMAIL_FROM`.
pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailSender {
    pub fn from_env() -> Result<Self> {
        let host = require_env("SMTP_HOST")?;
        let user = require_env("SMTP_USER")?;
        let pass = require_env("SMTP_PASS")?;
        let from = require_env("DIGEST_EMAIL_FROM")?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .map_err(|e| DigestError::Email(format!("invalid SMTP_HOST: {e}")))?
            .credentials(Credentials::new(user, pass))
            .build();
        let from = from
            .parse()
            .map_err(|e| DigestError::Email(format!("invalid DIGEST_EMAIL_FROM: {e}")))?;
        Ok(Self { mailer, from })
    }

    /// Render and send the digest to `to`, HTML with a plain-text
    /// alternative.
    pub async fn send_digest(&self, to: &str, items: &[ItemWithSummary]) -> Result<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| DigestError::Email(format!("invalid recipient: {e}")))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(digest_subject())
            .multipart(MultiPart::alternative_plain_html(
                render_digest_text(items),
                render_digest_html(items),
            ))
            .map_err(|e| DigestError::Email(format!("build email: {e}")))?;
        self.mailer
            .send(message)
            .await
            .map_err(|e| DigestError::Email(format!("send email: {e}")))?;
        Ok(())
    }
}
