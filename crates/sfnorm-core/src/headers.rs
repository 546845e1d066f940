//! Catalog of request headers and their dialect-scoped negotiation.
//!
//! Each entry pairs a header's documented default fields with the dialects
//! that accept it. Negotiation filters the catalog for one dialect and merges
//! caller overrides on top of the defaults, field by field.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use tracing::debug;

use sfnorm_model::Dialect;

/// Field values of one header.
pub type HeaderFields = Map<String, Value>;

/// Caller overrides: header name -> fields to replace.
pub type HeaderOverrides = BTreeMap<String, HeaderFields>;

const SOAP: &[Dialect] = &[Dialect::Soap];
const SOAP_REST: &[Dialect] = &[Dialect::Soap, Dialect::Rest];
const SOAP_METADATA: &[Dialect] = &[Dialect::Soap, Dialect::Metadata];
const SOAP_REST_METADATA: &[Dialect] = &[Dialect::Soap, Dialect::Rest, Dialect::Metadata];
const SOAP_BULK1: &[Dialect] = &[Dialect::Soap, Dialect::Bulk1];
const BULK1: &[Dialect] = &[Dialect::Bulk1];
const BULK: &[Dialect] = &[Dialect::Bulk1, Dialect::Bulk2];

static GLOBAL: LazyLock<HeaderRegistry> = LazyLock::new(HeaderRegistry::standard);

/// A named header with its defaults and the dialects it is valid for.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderEntry {
    pub name: &'static str,
    pub dialects: &'static [Dialect],
    pub defaults: HeaderFields,
}

impl HeaderEntry {
    pub fn applies_to(&self, dialect: Dialect) -> bool {
        self.dialects.contains(&dialect)
    }
}

/// Negotiated headers for one request, in catalog order.
///
/// Serializes as a map keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderBundle {
    headers: Vec<(String, HeaderFields)>,
}

impl HeaderBundle {
    fn get(&self, header: &str) -> Option<&HeaderFields> {
        self.headers
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, fields)| fields)
    }

    /// Value of `field` within `header`.
    pub fn field(&self, header: &str, field: &str) -> Option<&Value> {
        self.get(header).and_then(|fields| fields.get(field))
    }

    pub fn contains(&self, header: &str) -> bool {
        self.get(header).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl Serialize for HeaderBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.headers.iter().map(|(name, fields)| (name, fields)))
    }
}

/// Read-only header catalog.
#[derive(Debug, Clone)]
pub struct HeaderRegistry {
    entries: Vec<HeaderEntry>,
}

impl HeaderRegistry {
    /// Process-wide catalog, built on first use.
    pub fn global() -> &'static HeaderRegistry {
        &GLOBAL
    }

    /// Catalog of every documented header.
    ///
    /// Defaults that depend on the caller (session, locale) are null and only
    /// ever filled from overrides.
    pub fn standard() -> Self {
        let entries = vec![
            entry("AllOrNoneHeader", SOAP_REST_METADATA, json!({"allOrNone": false})),
            entry(
                "AllowFieldTruncationHeader",
                SOAP_METADATA,
                json!({"allowFieldTruncation": false}),
            ),
            entry(
                "AssignmentRuleHeader",
                SOAP_BULK1,
                json!({"assignmentRuleId": null, "useDefaultRule": true}),
            ),
            entry(
                "CallOptions",
                SOAP_REST_METADATA,
                json!({"client": null, "defaultNamespace": null}),
            ),
            entry(
                "DisableFeedTrackingHeader",
                SOAP,
                json!({"disableFeedTracking": false}),
            ),
            entry(
                "DuplicateRuleHeader",
                SOAP_REST,
                json!({
                    "allowSave": false,
                    "includeRecordDetails": false,
                    "runAsCurrentUser": true
                }),
            ),
            entry(
                "EmailHeader",
                SOAP,
                json!({
                    "triggerAutoResponseEmail": false,
                    "triggerOtherEmail": false,
                    "triggerUserEmail": true
                }),
            ),
            entry("LocaleOptions", SOAP, json!({"language": null})),
            entry("MruHeader", SOAP_REST, json!({"updateMru": false})),
            entry(
                "OwnerChangeOptions",
                SOAP,
                json!({"options": [
                    {"execute": true, "type": "EnforceNewOwnerHasReadAccess"},
                    {"execute": false, "type": "TransferNotesAndAttachments"},
                    {"execute": false, "type": "TransferOpenActivities"}
                ]}),
            ),
            entry(
                "PackageVersionHeader",
                SOAP_REST,
                json!({"packageVersions": null}),
            ),
            entry("QueryOptions", SOAP_REST, json!({"batchSize": 500})),
            entry("SessionHeader", SOAP_METADATA, json!({"sessionId": null})),
            entry(
                "UserTerritoryDeleteHeader",
                SOAP,
                json!({"transferToUserId": null}),
            ),
            entry(
                "BatchRetryHeader",
                BULK1,
                json!({"Sforce-Disable-Batch-Retry": false}),
            ),
            entry("LineEndingHeader", BULK, json!({"Sforce-Line-Ending": null})),
            entry(
                "PKChunkingHeader",
                BULK1,
                json!({"Sforce-Enable-PKChunking": false}),
            ),
        ];
        Self { entries }
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&HeaderEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Dialects `name` is valid for, or `None` for an unknown header.
    pub fn applicable_dialects(&self, name: &str) -> Option<&'static [Dialect]> {
        self.entry(name).map(|entry| entry.dialects)
    }

    /// Headers valid for `dialect`, with `overrides` merged over the defaults.
    ///
    /// Overrides naming unknown headers, or headers the dialect does not
    /// accept, are dropped.
    pub fn headers(&self, dialect: Dialect, overrides: &HeaderOverrides) -> HeaderBundle {
        for name in overrides.keys() {
            match self.applicable_dialects(name) {
                Some(dialects) if dialects.contains(&dialect) => {}
                Some(_) => debug!(header = %name, %dialect, "override ignored, header not valid for dialect"),
                None => debug!(header = %name, "override ignored, unknown header"),
            }
        }

        let headers = self
            .entries
            .iter()
            .filter(|entry| entry.applies_to(dialect))
            .map(|entry| {
                let mut fields = entry.defaults.clone();
                if let Some(replacements) = overrides.get(entry.name) {
                    for (field, value) in replacements {
                        fields.insert(field.clone(), value.clone());
                    }
                }
                (entry.name.to_string(), fields)
            })
            .collect();
        HeaderBundle { headers }
    }

    /// Like [`HeaderRegistry::headers`], for a raw dialect tag.
    ///
    /// An unrecognized tag yields an empty bundle.
    pub fn headers_for(&self, dialect: &str, overrides: &HeaderOverrides) -> HeaderBundle {
        match dialect.parse::<Dialect>() {
            Ok(dialect) => self.headers(dialect, overrides),
            Err(_) => {
                debug!(dialect, "no headers for unrecognized dialect");
                HeaderBundle::default()
            }
        }
    }
}

impl Default for HeaderRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Negotiate headers for `dialect` against the process-wide catalog.
pub fn headers(dialect: Dialect, overrides: &HeaderOverrides) -> HeaderBundle {
    HeaderRegistry::global().headers(dialect, overrides)
}

fn entry(name: &'static str, dialects: &'static [Dialect], defaults: Value) -> HeaderEntry {
    let defaults = match defaults {
        Value::Object(fields) => fields,
        _ => HeaderFields::new(),
    };
    HeaderEntry {
        name,
        dialects,
        defaults,
    }
}
