//! Decoding of `RetrieveResponseMsg` envelopes.

use tracing::{debug, warn};

use crate::{
    account_users::model::AccountUser,
    error::{Error, Result},
    xml::{self, as_sequence, Node},
};

/// The `OverallStatus` of a complete retrieve.
pub const STATUS_OK: &str = "OK";

fn child<'a>(node: &'a Node, name: &str) -> Result<&'a Node> {
    node.get(name)
        .ok_or_else(|| Error::Parse(format!("missing {} element", name)))
}

/// Turn a SOAP `Fault` element into an error.
fn fault(node: &Node) -> Error {
    Error::SoapFault {
        code: node.child_text("faultcode").unwrap_or_default().to_string(),
        message: node.child_text("faultstring").unwrap_or_default().to_string(),
    }
}

/// Get the `Body` of a parsed envelope, surfacing a SOAP fault as an error.
fn body(tree: &Node) -> Result<&Node> {
    let body = child(child(tree, "Envelope")?, "Body")?;
    match body.get("Fault") {
        Some(f) => Err(fault(f)),
        None => Ok(body),
    }
}

/// Extract the `Results` entries of a retrieve response, in document order.
///
/// A response holding a single user carries a lone `Results` element, one
/// without users carries none at all.
pub fn results(tree: &Node) -> Result<Vec<&Node>> {
    let msg = child(body(tree)?, "RetrieveResponseMsg")?;

    match msg.child_text("OverallStatus") {
        Some(STATUS_OK) => {}
        Some(status) => warn!(status, "retrieve did not complete, results may be partial"),
        None => debug!("response has no OverallStatus"),
    }

    Ok(as_sequence(msg.get("Results")))
}

/// Decode a retrieve response body into account users.
pub fn decode(xml: &str) -> Result<Vec<AccountUser>> {
    let tree = xml::parse(xml)?;
    let users: Vec<_> = results(&tree)?
        .into_iter()
        .map(AccountUser::from_node)
        .collect();
    debug!(count = users.len(), "decoded account users");
    Ok(users)
}

/// Extract a SOAP fault from a response body, if it is one.
pub(crate) fn decode_fault(xml: &str) -> Option<Error> {
    let tree = xml::parse(xml).ok()?;
    match body(&tree) {
        Err(e @ Error::SoapFault { .. }) => Some(e),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn envelope(results: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soap:Header>
    <wsa:Action xmlns:wsa="http://schemas.xmlsoap.org/ws/2004/08/addressing">RetrieveResponse</wsa:Action>
  </soap:Header>
  <soap:Body>
    <RetrieveResponseMsg xmlns="http://exacttarget.com/wsdl/partnerAPI">
      <OverallStatus>OK</OverallStatus>
      <RequestID>5a8c7f6d</RequestID>
      {}
    </RetrieveResponseMsg>
  </soap:Body>
</soap:Envelope>"#,
            results
        )
    }

    fn result(id: u32) -> String {
        format!(
            r#"<Results xsi:type="AccountUser"><AccountUserID>{id}</AccountUserID><Name>user{id}</Name></Results>"#,
            id = id
        )
    }

    #[test]
    fn test_decode_zero_users() {
        assert_eq!(decode(&envelope("")).unwrap(), vec![]);
    }

    #[test]
    fn test_decode_single_user() {
        let users = decode(&envelope(&result(1))).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].account_user_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_decode_empty_results_count_as_users() {
        let single = r#"<Results xsi:type="AccountUser"></Results>"#;
        assert_eq!(decode(&envelope(single)).unwrap(), vec![AccountUser::default()]);

        let pair = format!("{}{}", single, single);
        assert_eq!(decode(&envelope(&pair)).unwrap().len(), 2);
    }

    #[test]
    fn test_decode_many_users_in_order() {
        let body: String = (1..=5).map(result).collect();
        let users = decode(&envelope(&body)).unwrap();
        let ids: Vec<_> = users
            .iter()
            .map(|u| u.account_user_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_decode_missing_path() {
        match decode("<soap:Envelope><soap:Body><Other/></soap:Body></soap:Envelope>") {
            Err(Error::Parse(msg)) => assert!(msg.contains("RetrieveResponseMsg")),
            res => panic!("Expected parse error, got {:?}", res),
        }
        assert!(matches!(decode("<html></html>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_decode_fault() {
        let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><soap:Fault><faultcode>soap:Client</faultcode><faultstring>Login Failed</faultstring></soap:Fault></soap:Body></soap:Envelope>"#;

        match decode(xml) {
            Err(Error::SoapFault { code, message }) => {
                assert_eq!(code, "soap:Client");
                assert_eq!(message, "Login Failed");
            }
            res => panic!("Expected SOAP fault, got {:?}", res),
        }
        assert!(decode_fault(xml).is_some());
        assert!(decode_fault(&envelope("")).is_none());
        assert!(decode_fault("not xml").is_none());
    }

    #[test]
    fn test_decode_partial_status_still_returns_results() {
        let xml = envelope(&result(1)).replace(
            "<OverallStatus>OK</OverallStatus>",
            "<OverallStatus>MoreDataAvailable</OverallStatus>",
        );
        assert_eq!(decode(&xml).unwrap().len(), 1);
    }
}
