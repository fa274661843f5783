//! Rendering of code notifications

/// A rendered mail message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub subject: String,
    pub greeting: String,
    pub intro: String,
    pub code: String,
    pub outro: String,
}

impl MailMessage {
    /// Plain-text body
    pub fn text_body(&self) -> String {
        format!(
            "{}\n\n{}\n\n    {}\n\n{}\n",
            self.greeting, self.intro, self.code, self.outro
        )
    }

    /// HTML body with the code shown large and centered
    pub fn html_body(&self) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html>\n<body style=\"font-family: sans-serif; color: #333;\">\n",
                "<p style=\"font-weight: bold;\">{}</p>\n",
                "<p>{}</p>\n",
                "<p style=\"font-size: 3rem; letter-spacing: 0.3rem; text-align: center;\">{}</p>\n",
                "<p>{}</p>\n",
                "</body>\n</html>\n"
            ),
            escape_html(&self.greeting),
            escape_html(&self.intro),
            escape_html(&self.code),
            escape_html(&self.outro)
        )
    }
}

/// Notification content for one issued code
#[derive(Debug, Clone)]
pub struct OtpMessage {
    pub app_name: String,
    pub code: String,
    pub expires_in_minutes: i64,
}

impl OtpMessage {
    pub fn new(app_name: impl Into<String>, code: impl Into<String>, expires_in_minutes: i64) -> Self {
        Self {
            app_name: app_name.into(),
            code: code.into(),
            expires_in_minutes,
        }
    }

    pub fn to_mail(&self) -> MailMessage {
        MailMessage {
            subject: format!("{} is your {} verification code", self.code, self.app_name),
            greeting: String::from("Hello!"),
            intro: format!(
                "Somebody recently requested a one-time password for your {} account. Enter the following code:",
                self.app_name
            ),
            code: self.code.clone(),
            outro: format!(
                "The code expires in {} minutes. If you didn't request it, simply ignore this message.",
                self.expires_in_minutes
            ),
        }
    }

    /// Single-line SMS text
    pub fn to_sms(&self) -> String {
        format!(
            "Your {} one-time password is {}. It expires in {} minutes. If you didn't request it, ignore this message.",
            self.app_name, self.code, self.expires_in_minutes
        )
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
