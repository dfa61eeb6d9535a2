use serde::Serialize;
use tracing::warn;

use crate::xml::{as_sequence, Node};

/// An account user as returned by the SOAP API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUser {
    pub account_user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub active_flag: Option<String>,
    pub last_successful_login: Option<String>,
    pub is_api_user: Option<String>,
    pub default_business_unit: Option<String>,
    /// Role names in response order.
    pub roles: Vec<String>,
}

impl AccountUser {
    /// Decode a `Results` entry. Missing properties stay `None` so a single
    /// incomplete user never fails the whole batch.
    pub fn from_node(node: &Node) -> Self {
        let text = |name: &str| scalar(node, name);

        // `Roles/Role` is a single element for users with one role. An empty
        // `<Name/>` still counts as a role.
        let roles = as_sequence(node.get("Roles").and_then(|roles| roles.get("Role")))
            .into_iter()
            .filter_map(|role| role.get("Name"))
            .map(|name| name.text().unwrap_or_default().to_string())
            .collect();

        Self {
            account_user_id: text("AccountUserID"),
            name: text("Name"),
            email: text("Email"),
            active_flag: text("ActiveFlag"),
            last_successful_login: text("LastSuccessfulLogin"),
            is_api_user: text("IsAPIUser"),
            default_business_unit: text("DefaultBusinessUnit"),
            roles,
        }
    }

    /// Role names, each terminated by `;`.
    pub fn joined_roles(&self) -> String {
        self.roles.iter().map(|role| format!("{};", role)).collect()
    }
}

/// Read a single-valued property. A repeated property has no single value
/// and is left empty.
fn scalar(node: &Node, name: &str) -> Option<String> {
    match node.get(name) {
        Some(Node::List(values)) => {
            warn!(
                property = name,
                count = values.len(),
                "property repeated, leaving it empty"
            );
            None
        }
        Some(value) => value.text().map(str::to_string),
        None => None,
    }
}

/// A flattened account user, one CSV row.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub status: String,
    pub last_successful_login: String,
    #[serde(rename = "isAPIUser")]
    pub is_api_user: String,
    pub roles: String,
    pub default_business_unit: String,
}

impl UserRow {
    /// Column labels, in the order fields are serialized.
    pub const HEADERS: [&'static str; 8] = [
        "userId",
        "userName",
        "userEmail",
        "status",
        "lastSuccessfulLogin",
        "isAPIUser",
        "roles",
        "defaultBusinessUnit",
    ];
}

impl From<&AccountUser> for UserRow {
    fn from(user: &AccountUser) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            user_id: field(&user.account_user_id),
            user_name: field(&user.name),
            user_email: field(&user.email),
            status: field(&user.active_flag),
            last_successful_login: field(&user.last_successful_login),
            is_api_user: field(&user.is_api_user),
            roles: user.joined_roles(),
            default_business_unit: field(&user.default_business_unit),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::xml;

    fn user(roles: &str) -> AccountUser {
        let doc = format!(
            r#"<Results xsi:type="AccountUser">
                <AccountUserID>42</AccountUserID>
                <Name>Jane Doe</Name>
                <Email>jane@example.com</Email>
                <ActiveFlag>true</ActiveFlag>
                <LastSuccessfulLogin>2019-03-01T10:00:00</LastSuccessfulLogin>
                <IsAPIUser>false</IsAPIUser>
                <DefaultBusinessUnit>7</DefaultBusinessUnit>
                {}
            </Results>"#,
            roles
        );
        let tree = xml::parse(&doc).unwrap();
        AccountUser::from_node(tree.get("Results").unwrap())
    }

    #[test]
    fn test_from_node_scalar_fields() {
        let user = user("");
        assert_eq!(user.account_user_id.as_deref(), Some("42"));
        assert_eq!(user.name.as_deref(), Some("Jane Doe"));
        assert_eq!(user.email.as_deref(), Some("jane@example.com"));
        assert_eq!(user.active_flag.as_deref(), Some("true"));
        assert_eq!(user.last_successful_login.as_deref(), Some("2019-03-01T10:00:00"));
        assert_eq!(user.is_api_user.as_deref(), Some("false"));
        assert_eq!(user.default_business_unit.as_deref(), Some("7"));
    }

    #[test]
    fn test_roles_zero_one_many() {
        assert_eq!(user("").joined_roles(), "");
        assert_eq!(user("<Roles/>").joined_roles(), "");
        assert_eq!(
            user("<Roles><Role><Name>Viewer</Name></Role></Roles>").joined_roles(),
            "Viewer;"
        );
        assert_eq!(
            user(
                "<Roles><Role><Name>Admin</Name><ObjectID>1</ObjectID></Role>\
                 <Role><Name>Editor</Name></Role>\
                 <Role><Name>Viewer</Name></Role></Roles>"
            )
            .joined_roles(),
            "Admin;Editor;Viewer;"
        );
    }

    #[test]
    fn test_roles_without_name_are_skipped() {
        let user = user(
            "<Roles><Role><ObjectID>1</ObjectID></Role><Role><Name>Admin</Name></Role></Roles>",
        );
        assert_eq!(user.roles, vec!["Admin".to_string()]);
    }

    #[test]
    fn test_empty_role_name_keeps_its_segment() {
        let user = user("<Roles><Role><Name/></Role><Role><Name>Admin</Name></Role></Roles>");
        assert_eq!(user.roles, vec!["".to_string(), "Admin".to_string()]);
        assert_eq!(user.joined_roles(), ";Admin;");
    }

    #[test]
    fn test_repeated_scalar_is_left_empty() {
        let tree =
            xml::parse("<Results><Name>Bob</Name><Email>a@x</Email><Email>b@x</Email></Results>")
                .unwrap();
        let user = AccountUser::from_node(tree.get("Results").unwrap());
        assert_eq!(user.name.as_deref(), Some("Bob"));
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_role_names_are_not_escaped() {
        let user = user("<Roles><Role><Name>a;b</Name></Role></Roles>");
        assert_eq!(user.joined_roles(), "a;b;");
    }

    #[test]
    fn test_missing_fields_flatten_to_empty() {
        let tree = xml::parse("<Results><Name>Bob</Name></Results>").unwrap();
        let row = UserRow::from(&AccountUser::from_node(tree.get("Results").unwrap()));
        assert_eq!(
            row,
            UserRow {
                user_name: "Bob".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_row_column_mapping() {
        let row = UserRow::from(&user("<Roles><Role><Name>Admin</Name></Role></Roles>"));
        assert_eq!(row.user_id, "42");
        assert_eq!(row.user_name, "Jane Doe");
        assert_eq!(row.user_email, "jane@example.com");
        assert_eq!(row.status, "true");
        assert_eq!(row.last_successful_login, "2019-03-01T10:00:00");
        assert_eq!(row.is_api_user, "false");
        assert_eq!(row.roles, "Admin;");
        assert_eq!(row.default_business_unit, "7");
    }
}
