use url::{Url, form_urlencoded};

const PAYMENT_PARAM: &str = "payment";

/// Outcome marker the hosted checkout appends to the return URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentReturn {
    Success,
    Cancelled,
}

impl PaymentReturn {
    /// Consume the `payment` marker from `url`.
    ///
    /// Every `payment` parameter is stripped, other parameters are kept in
    /// order. Returns `None` when the marker is absent or unknown, so calling
    /// this twice on the same URL yields the outcome only once.
    pub fn take_from(url: &mut Url) -> Option<Self> {
        let query = url.query()?.to_owned();
        let mut marker = None;
        let mut kept: Vec<&str> = Vec::new();

        for segment in query.split('&') {
            match form_urlencoded::parse(segment.as_bytes()).next() {
                Some((key, value)) if key == PAYMENT_PARAM => {
                    marker = marker.or(Some(value.into_owned()));
                }
                _ => kept.push(segment),
            }
        }

        let marker = marker?;

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&kept.join("&")));
        }

        match marker.as_str() {
            "success" => Some(Self::Success),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Toast text shown once on return.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Payment successful! Activating protection...",
            Self::Cancelled => "Payment was cancelled.",
        }
    }

    /// Whether the subscription should be reconciled after this return.
    pub fn should_reconcile(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_marker_is_consumed_once() {
        let mut url = Url::parse("https://app.example.com/?payment=success").unwrap();

        assert_eq!(PaymentReturn::take_from(&mut url), Some(PaymentReturn::Success));
        assert_eq!(url.as_str(), "https://app.example.com/");
        assert_eq!(PaymentReturn::take_from(&mut url), None);
    }

    #[test]
    fn test_cancelled_marker_keeps_other_params() {
        let mut url =
            Url::parse("https://app.example.com/?ref=ad&payment=cancelled&lang=no").unwrap();

        assert_eq!(PaymentReturn::take_from(&mut url), Some(PaymentReturn::Cancelled));
        assert_eq!(url.as_str(), "https://app.example.com/?ref=ad&lang=no");
    }

    #[test]
    fn test_unknown_marker_is_stripped_without_outcome() {
        let mut url = Url::parse("https://app.example.com/?payment=maybe").unwrap();

        assert_eq!(PaymentReturn::take_from(&mut url), None);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_url_without_marker_is_untouched() {
        let mut url = Url::parse("https://app.example.com/?ref=ad").unwrap();

        assert_eq!(PaymentReturn::take_from(&mut url), None);
        assert_eq!(url.as_str(), "https://app.example.com/?ref=ad");
    }

    #[test]
    fn test_other_params_keep_their_raw_encoding() {
        let mut url =
            Url::parse("https://app.example.com/?q=a%20b&flag&payment=success").unwrap();

        assert_eq!(PaymentReturn::take_from(&mut url), Some(PaymentReturn::Success));
        assert_eq!(url.query(), Some("q=a%20b&flag"));
    }

    #[test]
    fn test_encoded_marker_key_is_recognised() {
        let mut url = Url::parse("https://app.example.com/?pay%6Dent=cancelled&x=1").unwrap();

        assert_eq!(PaymentReturn::take_from(&mut url), Some(PaymentReturn::Cancelled));
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn test_toast_messages() {
        assert_eq!(
            PaymentReturn::Success.message(),
            "Payment successful! Activating protection..."
        );
        assert_eq!(PaymentReturn::Cancelled.message(), "Payment was cancelled.");
    }

    #[test]
    fn test_only_success_triggers_reconcile() {
        assert!(PaymentReturn::Success.should_reconcile());
        assert!(!PaymentReturn::Cancelled.should_reconcile());
    }
}
