use crate::core::person::PersonName;
use crate::core::transfer::Transfer;

/// Derive a diagram node identifier from a name: runs of whitespace
/// collapse to a single underscore so the name is a valid node id.
pub fn node_id(name: &PersonName) -> String {
    name.as_str().split_whitespace().collect::<Vec<_>>().join("_")
}

/// Render a transfer list as a left-to-right Mermaid flowchart.
///
/// One line per transfer: `from("from") -->|amount| to("to")`, with
/// amounts formatted to two decimal places. An empty list renders the
/// header alone.
///
/// # Examples
///
/// ```
/// use split_settle::core::person::PersonName;
/// use split_settle::core::transfer::Transfer;
/// use split_settle::diagram::mermaid::flowchart;
///
/// let chart = flowchart(&[Transfer::new(
///     PersonName::new("alice"),
///     PersonName::new("bob"),
///     50.0,
/// )]);
/// assert_eq!(chart, "flowchart LR\n    alice(\"alice\") -->|50.00| bob(\"bob\")\n");
/// ```
pub fn flowchart(transfers: &[Transfer]) -> String {
    let mut out = String::from("flowchart LR\n");
    for transfer in transfers {
        out.push_str(&format!(
            "    {}(\"{}\") -->|{:.2}| {}(\"{}\")\n",
            node_id(transfer.from()),
            transfer.from(),
            transfer.amount(),
            node_id(transfer.to()),
            transfer.to(),
        ));
    }
    out
}
