//! Declarative route authorization
//!
//! The table is data: an ordered list of rules, evaluated top-down, first match
//! wins. A deny is terminal and is decided before any handler runs.

use crate::domain::entities::user::Role;
use crate::domain::value_objects::Identity;

use super::pattern::PathPattern;

/// What a rule demands from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Role(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No identity presented where one is required
    Unauthenticated,
    /// Identity presented but its role does not satisfy the rule
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny(DenyReason),
}

#[derive(Debug, Clone)]
pub struct Rule {
    /// Uppercase HTTP methods; empty means any
    methods: Vec<String>,
    patterns: Vec<PathPattern>,
    requirement: Requirement,
}

impl Rule {
    /// Rule applying to every method
    pub fn any(patterns: &[&str], requirement: Requirement) -> Self {
        Self::on(&[], patterns, requirement)
    }

    pub fn on(methods: &[&str], patterns: &[&str], requirement: Requirement) -> Self {
        Self {
            methods: methods.iter().map(|m| m.to_ascii_uppercase()).collect(),
            patterns: patterns.iter().map(|p| PathPattern::parse(p)).collect(),
            requirement,
        }
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    fn applies_to(&self, method: &str, path: &str) -> bool {
        let method_ok = self.methods.is_empty()
            || self.methods.iter().any(|m| m.eq_ignore_ascii_case(method));
        method_ok && self.patterns.iter().any(|p| p.matches(path))
    }
}

const WRITE_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    rules: Vec<Rule>,
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self::rental_api()
    }
}

impl AuthorizationPolicy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Route table of the rental API
    pub fn rental_api() -> Self {
        let public = Requirement::Public;
        let authenticated = Requirement::Authenticated;
        let staff = Requirement::Role(Role::Staff);

        Self::new(vec![
            Rule::any(&["/api/v1/auth/login", "/api/v1/auth/register"], public),
            Rule::any(&["/api/v1/auth/register/staff"], staff),
            Rule::on(&["GET"], &["/health", "/api/v1"], public),
            Rule::on(&["GET"], &["/api/v1/vehicles", "/api/v1/vehicles/**"], public),
            Rule::on(WRITE_METHODS, &["/api/v1/vehicles", "/api/v1/vehicles/**"], staff),
            Rule::any(&["/api/v1/users/me", "/api/v1/users/me/**"], authenticated),
            Rule::any(&["/api/v1/users", "/api/v1/users/*", "/api/v1/users/*/**"], staff),
            Rule::any(&["/api/v1/users/**"], authenticated),
            Rule::on(&["GET"], &["/api/v1/rentals/user/*"], staff),
            Rule::any(&["/api/v1/rentals", "/api/v1/rentals/**"], authenticated),
            Rule::any(&["/**"], authenticated),
        ])
    }

    /// First rule matching `method` and `path`, if any
    pub fn rule_for(&self, method: &str, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.applies_to(method, path))
    }

    /// Decides whether `identity` may call `method path`
    ///
    /// Paths no rule covers require authentication.
    pub fn evaluate(&self, method: &str, path: &str, identity: Option<&Identity>) -> Decision {
        let requirement = self
            .rule_for(method, path)
            .map(Rule::requirement)
            .unwrap_or(Requirement::Authenticated);

        match (requirement, identity) {
            (Requirement::Public, _) => Decision::Permit,
            (_, None) => Decision::Deny(DenyReason::Unauthenticated),
            (Requirement::Authenticated, Some(_)) => Decision::Permit,
            (Requirement::Role(role), Some(id)) if id.role == role => Decision::Permit,
            (Requirement::Role(_), Some(_)) => Decision::Deny(DenyReason::Forbidden),
        }
    }
}
