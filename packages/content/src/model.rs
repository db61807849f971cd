//! # Content Document Model
//!
//! Canonical shape of a tenant's editable site content.
//!
//! A site document is stored as one JSON value per tenant and edited
//! field-by-field. Stored documents may predate newer fields (the shape has
//! grown over time), so reads go through [`materialize`], which deep-merges
//! the stored value over [`default_content`]. Downstream code can therefore
//! assume every key of the canonical shape is present.
//!
//! The typed structs here are a convenience view for UI code; the editing
//! core operates on `serde_json::Value` so that unknown keys and malformed
//! scalars in legacy documents pass through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A tenant's full editable site document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebsiteContent {
    /// Display name shown in the site header
    pub business_name: String,

    /// Free-form "about us" copy
    pub about_us: String,

    /// Ordered list of offered services (order is user-curated)
    pub services: Vec<String>,

    /// Public contact details
    pub contact_info: ContactInfo,

    /// Lead capture form configuration
    pub lead_form: LeadForm,

    /// Visual theme settings
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadForm {
    /// Whether the lead form renders on the public site
    pub enabled: bool,

    /// Which inputs the form shows
    pub fields: LeadFormFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadFormFields {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub message: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    /// Hex color, e.g. "#2563eb" (validated in the UI, not here)
    pub primary_color: String,

    /// Hex color for accents
    pub secondary_color: String,

    pub font_family: String,

    /// Public URL of the hero image (opaque string)
    pub top_image: String,

    /// Hero overlay opacity, 0–100
    pub overlay_opacity: i64,
}

impl Default for WebsiteContent {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            about_us: String::new(),
            services: Vec::new(),
            contact_info: ContactInfo::default(),
            lead_form: LeadForm::default(),
            theme: Theme::default(),
        }
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: String::new(),
            email: String::new(),
            address: String::new(),
        }
    }
}

impl Default for LeadForm {
    fn default() -> Self {
        Self {
            enabled: true,
            fields: LeadFormFields::default(),
        }
    }
}

impl Default for LeadFormFields {
    fn default() -> Self {
        Self {
            name: true,
            email: true,
            phone: false,
            message: true,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            secondary_color: "#1e40af".to_string(),
            font_family: "Inter".to_string(),
            top_image: String::new(),
            overlay_opacity: 40,
        }
    }
}

impl WebsiteContent {
    /// Typed view of a stored document.
    ///
    /// Each top-level field is decoded independently, so one malformed
    /// field degrades to its default instead of failing the whole view.
    pub fn from_value(value: &Value) -> WebsiteContent {
        let doc = materialize(value);
        WebsiteContent {
            business_name: field(&doc, "businessName"),
            about_us: field(&doc, "aboutUs"),
            services: field(&doc, "services"),
            contact_info: field(&doc, "contactInfo"),
            lead_form: field(&doc, "leadForm"),
            theme: field(&doc, "theme"),
        }
    }
}

fn field<T>(doc: &Value, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    doc.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

/// The canonical default document.
///
/// Kept as a literal so it is total; a test asserts it stays in sync with
/// the `Default` impls above.
pub fn default_content() -> Value {
    json!({
        "businessName": "",
        "aboutUs": "",
        "services": [],
        "contactInfo": {
            "phone": "",
            "email": "",
            "address": ""
        },
        "leadForm": {
            "enabled": true,
            "fields": {
                "name": true,
                "email": true,
                "phone": false,
                "message": true
            }
        },
        "theme": {
            "primaryColor": "#2563eb",
            "secondaryColor": "#1e40af",
            "fontFamily": "Inter",
            "topImage": "",
            "overlayOpacity": 40
        }
    })
}

/// Read-repair a stored document against the canonical defaults.
///
/// Deep-merges `raw` over [`default_content`]. Defaults win only for keys
/// absent from `raw`; present values pass through uncoerced even when
/// malformed, and keys unknown to the canonical shape survive the merge.
pub fn materialize(raw: &Value) -> Value {
    merge_defaults(&default_content(), raw)
}

fn merge_defaults(default: &Value, stored: &Value) -> Value {
    match (default, stored) {
        (Value::Object(defaults), Value::Object(present)) => {
            let mut merged = Map::with_capacity(defaults.len() + present.len());
            for (key, default_value) in defaults {
                let value = match present.get(key) {
                    Some(stored_value) => merge_defaults(default_value, stored_value),
                    None => default_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            // Unknown keys in the stored document are preserved as-is.
            for (key, stored_value) in present {
                if !defaults.contains_key(key) {
                    merged.insert(key.clone(), stored_value.clone());
                }
            }
            Value::Object(merged)
        }
        // A null where an object belongs reads as "nothing stored here yet".
        (Value::Object(_), Value::Null) => default.clone(),
        // Any other stored value wins over the default, uncoerced.
        _ => stored.clone(),
    }
}
