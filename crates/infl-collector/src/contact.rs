//! Contact detail extraction from free-text channel descriptions.

use std::sync::LazyLock;

use infl_core::SocialLinks;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("valid email regex"));

// Checked in order; the first phrase that matches wins.
static BUSINESS_EMAIL_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)business\s*email\s*[:-]?\s*([\w.-]+@[\w.-]+\.\w+)")
            .expect("valid business email regex"),
        Regex::new(r"(?i)for\s*business\s*[:-]?\s*([\w.-]+@[\w.-]+\.\w+)")
            .expect("valid for-business regex"),
        Regex::new(r"(?i)business\s*inquiries\s*[:-]?\s*([\w.-]+@[\w.-]+\.\w+)")
            .expect("valid business inquiries regex"),
    ]
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
        .expect("valid phone regex")
});

static INSTAGRAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)instagram\.com/([A-Za-z0-9_.-]+)").expect("valid instagram regex")
});
static TWITTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)twitter\.com/([A-Za-z0-9_.-]+)").expect("valid twitter regex")
});
static FACEBOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)facebook\.com/([A-Za-z0-9_.-]+)").expect("valid facebook regex")
});

/// Contact details found in a description. Every field is independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub business_email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

impl ContactInfo {
    #[must_use]
    pub fn social_links(&self) -> SocialLinks {
        SocialLinks {
            instagram: self.instagram.clone(),
            twitter: self.twitter.clone(),
            facebook: self.facebook.clone(),
        }
    }
}

/// Extracts the first email, business email, phone number and social handles
/// from `text`. Never fails; anything not found is `None`.
///
/// The business-email phrases are searched whether or not a plain email was
/// found.
#[must_use]
pub fn extract_contact_info(text: &str) -> ContactInfo {
    if text.is_empty() {
        return ContactInfo::default();
    }

    ContactInfo {
        email: first_match(&EMAIL_RE, text),
        business_email: BUSINESS_EMAIL_RES
            .iter()
            .find_map(|re| first_group(re, text)),
        phone: first_match(&PHONE_RE, text),
        instagram: first_group(&INSTAGRAM_RE, text),
        twitter: first_group(&TWITTER_RE, text),
        facebook: first_group(&FACEBOOK_RE, text),
    }
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
