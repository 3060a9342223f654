//! Static registry of the actions the remote service supports.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::HttpMethod;

/// Static description of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub method: HttpMethod,
    /// Parameter names the action accepts, `None` when it takes none.
    pub accepted_params: Option<&'static [&'static str]>,
    pub description: &'static str,
}

impl ActionDescriptor {
    pub fn accepts_params(&self) -> bool {
        self.accepted_params.is_some_and(|p| !p.is_empty())
    }

    pub fn accepts(&self, param: &str) -> bool {
        self.accepted_params.is_some_and(|p| p.contains(&param))
    }
}

pub const USER_AUTH: &str = "user_auth";
pub const USERS_LIST: &str = "users_list";
pub const TEAMS_LIST: &str = "teams_list";

static ACTIONS: [ActionDescriptor; 3] = [
    ActionDescriptor {
        name: USER_AUTH,
        path: "/users/sign_in/",
        method: HttpMethod::Post,
        accepted_params: Some(&["email", "password"]),
        description: "Auth user",
    },
    ActionDescriptor {
        name: USERS_LIST,
        path: "/users",
        method: HttpMethod::Get,
        accepted_params: None,
        description: "Get users list",
    },
    ActionDescriptor {
        name: TEAMS_LIST,
        path: "/teams",
        method: HttpMethod::Get,
        accepted_params: None,
        description: "Get teams list",
    },
];

/// All registered actions, in registration order.
pub fn actions() -> &'static [ActionDescriptor] {
    &ACTIONS
}

pub fn lookup(name: &str) -> Result<&'static ActionDescriptor, ApiError> {
    ACTIONS
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| ApiError::UnknownAction(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_table() {
        let auth = lookup(USER_AUTH).unwrap();
        assert_eq!(auth.path, "/users/sign_in/");
        assert_eq!(auth.method, HttpMethod::Post);
        assert!(auth.accepts("email"));
        assert!(auth.accepts("password"));
        assert!(!auth.accepts("uid"));

        let users = lookup(USERS_LIST).unwrap();
        assert_eq!(users.path, "/users");
        assert_eq!(users.method, HttpMethod::Get);
        assert!(!users.accepts_params());

        let teams = lookup(TEAMS_LIST).unwrap();
        assert_eq!(teams.path, "/teams");
        assert_eq!(teams.method, HttpMethod::Get);
    }

    #[test]
    fn every_registered_action_resolves_to_itself() {
        for action in actions() {
            assert_eq!(lookup(action.name).unwrap(), action);
        }
    }

    #[test]
    fn unknown_action_is_an_error() {
        let err = lookup("teams_delete").unwrap_err();
        assert!(matches!(err, ApiError::UnknownAction(ref n) if n == "teams_delete"));
        assert!(lookup("").is_err());
        assert!(lookup("USERS_LIST").is_err());
    }

    #[test]
    fn empty_param_list_does_not_count_as_accepting() {
        let action = ActionDescriptor {
            name: "ping",
            path: "/ping",
            method: HttpMethod::Get,
            accepted_params: Some(&[]),
            description: "Ping",
        };
        assert!(!action.accepts_params());
    }
}
