//! Server-side filters for call log queries
//!
//! A [`CallLogFilter`] is a plain value: every predicate is optional and
//! only the ones that are set (and non-empty) are sent to the service.
//!
//! # Examples
//!
//! ```
//! use callstat_core::filters::CallLogFilter;
//! use callstat_core::types::{CallDirection, CallKind};
//!
//! let filter = CallLogFilter::new()
//!     .with_direction(CallDirection::SuccessfulOutbound)
//!     .with_kind(CallKind::Mobile);
//!
//! let params = filter.query_pairs();
//! assert_eq!(params[0], ("filter_RICHTUNG", "11".to_string()));
//! assert_eq!(params[1], ("filter_ART", "mobile".to_string()));
//! ```

use crate::types::{CallDirection, CallKind, CallType};

/// Optional predicates applied by the remote call log
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallLogFilter {
    /// Own number the call was made from or to
    pub number: Option<String>,
    /// Remote party number
    pub partner: Option<String>,
    /// Direction and outcome
    pub direction: Option<CallDirection>,
    /// Call or media type
    pub call_type: Option<CallType>,
    /// Tariff category
    pub kind: Option<CallKind>,
}

impl CallLogFilter {
    /// Create a filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter used for billing reports: connected outbound calls only
    pub fn successful_outbound() -> Self {
        Self::new().with_direction(CallDirection::SuccessfulOutbound)
    }

    /// Set the number filter
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Set the partner filter
    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    /// Set the direction filter
    pub fn with_direction(mut self, direction: CallDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set the call type filter
    pub fn with_call_type(mut self, call_type: CallType) -> Self {
        self.call_type = Some(call_type);
        self
    }

    /// Set the call kind filter
    pub fn with_kind(mut self, kind: CallKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Query parameters for the predicates that are set, keyed by remote field name
    ///
    /// Empty values are skipped, matching how the service treats an absent
    /// parameter.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let fields: [(&'static str, Option<&str>); 5] = [
            ("filter_RUFNUMMER", self.number.as_deref()),
            ("filter_PARTNER", self.partner.as_deref()),
            ("filter_RICHTUNG", self.direction.as_ref().map(|d| d.as_str())),
            ("filter_TYPE", self.call_type.as_ref().map(|t| t.as_str())),
            ("filter_ART", self.kind.as_ref().map(|k| k.as_str())),
        ];

        fields
            .into_iter()
            .filter_map(|(key, value)| match value {
                Some(v) if !v.is_empty() => Some((key, v.to_string())),
                _ => None,
            })
            .collect()
    }

    /// Whether no predicate would be sent to the service
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}
