//! Display formatting for calculator figures.
//!
//! Rupee amounts use Indian digit grouping (`12,34,567`): the last three
//! digits form one group and every group before it has two.

/// Format a whole-rupee amount with Indian grouping, e.g. `₹3,18,060`.
///
/// Rounds to the nearest rupee.
#[must_use]
pub fn rupees(amount: f64) -> String {
    format!("₹{}", group_indian(amount))
}

/// Format an amount in lakhs with one decimal, e.g. `₹90.0L`.
#[must_use]
pub fn lakhs(amount: f64) -> String {
    format!("₹{:.1}L", amount / 100_000.0)
}

/// Format a percentage with one decimal, e.g. `6.4%`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Round to a whole number and group the digits the Indian way.
#[must_use]
pub fn group_indian(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            groups.push(right);
            rest = left;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{tail}", groups.join(","))
    };

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
