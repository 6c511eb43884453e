//! `work-info` service.

use crate::services::WORK_INFO_NAMESPACE;
use crate::xml::Element;

/// Acknowledge the agent's response and end the HTTP/HTTPS transaction.
pub fn bye() -> Element {
    Element::namespaced(WORK_INFO_NAMESPACE, "info")
        .with_child(Element::new("workInfo").with_child(Element::new("bye")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn bye_is_bare() {
        let info = bye();
        assert_eq!(info.tag(), "{urn:cisco:pnp:work-info}info");
        assert_eq!(info.attributes().count(), 0);
        let work = info.child("workInfo").unwrap();
        assert_eq!(work.attributes().count(), 0);
        let bye = work.child("bye").unwrap();
        assert!(bye.children().is_empty() && bye.text().is_none());

        let xml = String::from_utf8(info.to_bytes().unwrap()).unwrap();
        assert_eq!(
            xml,
            r#"<info xmlns="urn:cisco:pnp:work-info"><workInfo><bye/></workInfo></info>"#
        );
    }
}
