//! The SOAP `Retrieve` request for `AccountUser` objects.

use quick_xml::escape::escape;

/// The `AccountUser` properties requested from the API, in request order.
/// The API contract depends on this exact list.
pub const PROPERTIES: [&str; 8] = [
    "Name",
    "AccountUserID",
    "Email",
    "ActiveFlag",
    "LastSuccessfulLogin",
    "IsAPIUser",
    "Roles",
    "DefaultBusinessUnit",
];

/// The object type we retrieve.
pub const OBJECT_TYPE: &str = "AccountUser";

/// Value of the `SOAPAction` header for a retrieve call.
pub const SOAP_ACTION: &str = "Retrieve";

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const FUEL_OAUTH_NS: &str = "http://exacttarget.com";
pub const PARTNER_API_NS: &str = "http://exacttarget.com/wsdl/partnerAPI";

/// Render the `RetrieveRequestMsg` envelope, authenticated with the given
/// access token in a `fueloauth` header.
pub fn retrieve_envelope(access_token: &str) -> String {
    let properties: String = PROPERTIES
        .iter()
        .map(|property| format!("<Properties>{}</Properties>", property))
        .collect();

    format!(
        concat!(
            r#"<soapenv:Envelope xmlns:soapenv="{soap}" xmlns:xsd="{xsd}" xmlns:xsi="{xsi}">"#,
            r#"<soapenv:Header><fueloauth xmlns="{fuel}">{token}</fueloauth></soapenv:Header>"#,
            r#"<soapenv:Body><RetrieveRequestMsg xmlns="{partner}"><RetrieveRequest>"#,
            r#"<ObjectType>{object_type}</ObjectType>{properties}"#,
            r#"</RetrieveRequest></RetrieveRequestMsg></soapenv:Body></soapenv:Envelope>"#,
        ),
        soap = SOAP_ENV_NS,
        xsd = XSD_NS,
        xsi = XSI_NS,
        fuel = FUEL_OAUTH_NS,
        token = escape(access_token),
        partner = PARTNER_API_NS,
        object_type = OBJECT_TYPE,
        properties = properties,
    )
}
