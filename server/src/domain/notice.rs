//! Billing notice summaries and pre-filled messaging links.
//!
//! Notices are plain-text bill summaries wrapped into `wa.me` links so the
//! owner can forward them from their own phone. Building a notice only reads
//! the document; nothing here mutates state.

use chrono::Utc;
use url::Url;

use crate::domain::{Error, Portion};

/// A prepared notice: destination number, message body, and the pre-filled
/// messaging link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillNotice {
    pub to: String,
    pub message: String,
    pub url: Url,
}

/// The current billing period label, e.g. "march 2024".
pub fn current_period() -> String {
    Utc::now().format("%B %Y").to_string().to_lowercase()
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn wa_link(to: &str, message: &str) -> Result<Url, Error> {
    let mut url = Url::parse(&format!("https://wa.me/{to}"))
        .map_err(|err| Error::internal(format!("failed to build messaging link: {err}")))?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

/// Bill summary for one portion and period, falling back to a "no bill"
/// notice when nothing has been generated for the period.
pub fn bill_summary(portion: &Portion, period: &str) -> String {
    let mut message = format!(
        "Hello, this is your rental bill for {}:\n",
        capitalize(period)
    );
    match portion.bills.get(period) {
        Some(bill) => {
            message.push_str(&format!("Rent: \u{20b9}{}\n", bill.rent));
            message.push_str(&format!("Water: \u{20b9}{}\n", bill.water));
            message.push_str(&format!("Electricity: \u{20b9}{}\n", bill.electricity));
            message.push_str(&format!("Extra: \u{20b9}{}\n", bill.extra));
            message.push_str(&format!("Total: \u{20b9}{}", bill.total));
        }
        None => message.push_str("No bill generated for this month yet."),
    }
    message
}

/// Combined summary of every portion's bill for the period.
pub fn combined_summary(portions: &[Portion], period: &str) -> String {
    let mut message = format!("Rental Bills for {}:\n\n", capitalize(period));
    for portion in portions {
        message.push_str(&format!("{}:\n", portion.name));
        match portion.bills.get(period) {
            Some(bill) => {
                message.push_str(&format!("  Rent: \u{20b9}{}\n", bill.rent));
                message.push_str(&format!("  Water: \u{20b9}{}\n", bill.water));
                message.push_str(&format!("  Electricity: \u{20b9}{}\n", bill.electricity));
                message.push_str(&format!("  Extra: \u{20b9}{}\n", bill.extra));
                message.push_str(&format!("  Total: \u{20b9}{}\n\n", bill.total));
            }
            None => message.push_str("  No bill generated for this month yet.\n\n"),
        }
    }
    message
}

/// Notice for a single portion, preferring the primary contact number and
/// falling back to the secondary.
pub fn portion_notice(portion: &Portion, period: &str) -> Result<BillNotice, Error> {
    let to = if portion.contact_number.is_empty() {
        portion.contact_number_2.as_str()
    } else {
        portion.contact_number.as_str()
    };
    if to.is_empty() {
        return Err(Error::invalid_request(
            "no contact number available for this portion",
        ));
    }

    let message = bill_summary(portion, period);
    let url = wa_link(to, &message)?;
    Ok(BillNotice {
        to: to.to_owned(),
        message,
        url,
    })
}

/// Combined notice over every portion, addressed to the first portion's
/// primary contact. This is a single review-before-sending notice the owner
/// forwards themselves, not a broadcast, so only one destination is needed.
pub fn combined_notice(portions: &[Portion], period: &str) -> Result<BillNotice, Error> {
    let first = portions
        .first()
        .ok_or_else(|| Error::not_found("no portions found"))?;

    let message = combined_summary(portions, period);
    let url = wa_link(&first.contact_number, &message)?;
    Ok(BillNotice {
        to: first.contact_number.clone(),
        message,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bill, ErrorCode};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn portion(name: &str, contact: &str, contact_2: &str) -> Portion {
        Portion {
            id: 1,
            floor: "1".to_owned(),
            portion_no: "A".to_owned(),
            portion_type: "1BHK".to_owned(),
            name: name.to_owned(),
            tenant_type: "Family".to_owned(),
            members: Vec::new(),
            contact_number: contact.to_owned(),
            contact_number_2: contact_2.to_owned(),
            id_proofs: Vec::new(),
            photos: Vec::new(),
            bills: std::collections::BTreeMap::new(),
        }
    }

    fn with_march_bill(mut portion: Portion) -> Portion {
        portion.bills.insert(
            "march 2024".to_owned(),
            Bill::new(
                Decimal::from(1000),
                Decimal::from(100),
                Decimal::from(200),
                Decimal::ZERO,
            ),
        );
        portion
    }

    #[rstest]
    fn summary_lists_every_amount_and_the_total() {
        let portion = with_march_bill(portion("Alice", "919999999999", ""));
        let message = bill_summary(&portion, "march 2024");

        assert!(message.starts_with("Hello, this is your rental bill for March 2024:\n"));
        assert!(message.contains("Rent: \u{20b9}1000\n"));
        assert!(message.contains("Water: \u{20b9}100\n"));
        assert!(message.contains("Electricity: \u{20b9}200\n"));
        assert!(message.contains("Extra: \u{20b9}0\n"));
        assert!(message.ends_with("Total: \u{20b9}1300"));
    }

    #[rstest]
    fn summary_falls_back_when_no_bill_exists_for_the_period() {
        let portion = with_march_bill(portion("Alice", "919999999999", ""));
        let message = bill_summary(&portion, "april 2024");
        assert!(message.ends_with("No bill generated for this month yet."));
    }

    #[rstest]
    fn notice_prefers_primary_contact() {
        let portion = portion("Alice", "919999999999", "918888888888");
        let notice = portion_notice(&portion, "march 2024").expect("notice");
        assert_eq!(notice.to, "919999999999");
        assert_eq!(notice.url.host_str(), Some("wa.me"));
        assert_eq!(notice.url.path(), "/919999999999");
    }

    #[rstest]
    fn notice_falls_back_to_secondary_contact() {
        let portion = portion("Alice", "", "918888888888");
        let notice = portion_notice(&portion, "march 2024").expect("notice");
        assert_eq!(notice.to, "918888888888");
    }

    #[rstest]
    fn notice_without_any_contact_is_rejected() {
        let portion = portion("Alice", "", "");
        let err = portion_notice(&portion, "march 2024").expect_err("no contact");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn link_percent_encodes_the_message() {
        let portion = with_march_bill(portion("Alice", "919999999999", ""));
        let notice = portion_notice(&portion, "march 2024").expect("notice");
        let query = notice.url.query().expect("query");
        assert!(query.starts_with("text="));
        assert!(!query.contains('\n'));
    }

    #[rstest]
    fn combined_notice_addresses_only_the_first_contact() {
        let portions = vec![
            with_march_bill(portion("Alice", "919999999999", "")),
            portion("Bob", "918888888888", ""),
        ];
        let notice = combined_notice(&portions, "march 2024").expect("notice");

        assert_eq!(notice.to, "919999999999");
        assert!(notice.message.starts_with("Rental Bills for March 2024:\n\n"));
        assert!(notice.message.contains("Alice:\n  Rent: \u{20b9}1000\n"));
        assert!(
            notice
                .message
                .contains("Bob:\n  No bill generated for this month yet.\n\n")
        );
    }

    #[rstest]
    fn combined_notice_over_no_portions_is_not_found() {
        let err = combined_notice(&[], "march 2024").expect_err("empty");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
