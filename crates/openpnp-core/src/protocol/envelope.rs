//! PnP envelope: the `pnp` root element wrapping exactly one service body.
//!
//! ```xml
//! <pnp xmlns="urn:cisco:pnp" version="1.0" udi="PID:...,VID:...,SN:...">
//!   <request xmlns="urn:cisco:pnp:device-info" correlator="...">...</request>
//! </pnp>
//! ```

use std::fmt;

use crate::error::{PnpError, Result};
use crate::protocol::udi::Udi;
use crate::protocol::{PNP_NAMESPACE, PROTOCOL_VERSION};
use crate::xml::Element;

/// One PnP message (agent request or server reply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    udi: String,
    username: Option<String>,
    password: Option<String>,
    body: Element,
}

impl Envelope {
    pub fn new(udi: impl Into<String>, body: Element) -> Self {
        Self {
            udi: udi.into(),
            username: None,
            password: None,
            body,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Parse a raw envelope document.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let root = Element::parse(input)?;

        if root.name() != "pnp" || root.namespace() != Some(PNP_NAMESPACE) {
            return Err(PnpError::malformed(format!(
                "expected {{{PNP_NAMESPACE}}}pnp root, got {}",
                root.tag()
            )));
        }

        if let Some(text) = root.text().filter(|t| !t.trim().is_empty()) {
            return Err(PnpError::malformed(format!(
                "text {text:?} directly inside the pnp root"
            )));
        }

        let udi = root
            .attr("udi")
            .ok_or_else(|| PnpError::malformed("envelope has no udi attribute"))?
            .to_owned();
        let username = root.attr("username").map(str::to_owned);
        let password = root.attr("password").map(str::to_owned);

        let body = match root.children() {
            [body] => body.clone(),
            children => {
                return Err(PnpError::malformed(format!(
                    "envelope must carry exactly one body element, found {}",
                    children.len()
                )))
            }
        };

        if let Some(flag) = body.attr("success") {
            if flag != "0" && flag != "1" {
                return Err(PnpError::malformed(format!(
                    "success attribute must be \"0\" or \"1\", got {flag:?}"
                )));
            }
        }

        Ok(Self {
            udi,
            username,
            password,
            body,
        })
    }

    /// Build a reply carrying `body`, stamped with this envelope's correlator.
    ///
    /// Session attributes are copied; `self` is left untouched. When `self`
    /// has no correlator the reply body is left unstamped; the server rejects
    /// such work messages before they get here.
    pub fn make_reply(&self, mut body: Element) -> Envelope {
        if let Some(correlator) = self.correlator() {
            body.set_attr("correlator", correlator);
        }
        Envelope {
            udi: self.udi.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            body,
        }
    }

    /// Serialize to an XML document that parses back to an equal envelope.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        self.to_element().to_document()
    }

    fn to_element(&self) -> Element {
        let mut root = Element::namespaced(PNP_NAMESPACE, "pnp")
            .with_attr("version", PROTOCOL_VERSION)
            .with_attr("udi", self.udi.as_str());
        if let Some(username) = &self.username {
            root.set_attr("username", username.as_str());
        }
        if let Some(password) = &self.password {
            root.set_attr("password", password.as_str());
        }
        root.push_child_verbatim(self.body.clone());
        root
    }

    pub fn udi(&self) -> &str {
        &self.udi
    }

    pub fn set_udi(&mut self, udi: impl Into<String>) {
        self.udi = udi.into();
    }

    /// UDI split into its PID/VID/SN triple.
    pub fn parsed_udi(&self) -> Result<Udi> {
        self.udi.parse()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn set_password(&mut self, password: Option<String>) {
        self.password = password;
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn into_body(self) -> Element {
        self.body
    }

    /// Session correlator. Absent on some info bodies such as `bye`.
    pub fn correlator(&self) -> Option<&str> {
        self.body.attr("correlator")
    }

    /// Outcome flag of a work response; `None` on requests.
    pub fn success(&self) -> Option<bool> {
        match self.body.attr("success")? {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        }
    }

    /// Body namespace, which names the service (`urn:cisco:pnp:<service>`).
    pub fn service(&self) -> Option<&str> {
        self.body.namespace()
    }

    /// Message kind: `request`, `response` or `info`.
    pub fn kind(&self) -> &str {
        self.body.name()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "udi={} service={} kind={}",
            self.udi,
            self.service().unwrap_or("-"),
            self.kind()
        )?;
        if let Some(correlator) = self.correlator() {
            write!(f, " correlator={correlator}")?;
        }
        if let Some(success) = self.success() {
            write!(f, " success={success}")?;
        }
        Ok(())
    }
}
