/*
 * Responsibility
 * - 経路別の認可テーブル (ordered, first match wins)
 * - 評価は pure: (path, principal) -> Decision
 */
use crate::api::extractors::principal::{Principal, RoleClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// No principal needed; authentication is bypassed entirely.
    Public,
    /// Any present principal.
    AnyAuthenticated,
    /// A present principal of exactly this class.
    Role(RoleClass),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    Prefix(&'static str),
    /// Catch-all. Keeps the unmatched-path default visible inside the table.
    Any,
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == *p,
            PathPattern::Prefix(p) => path.starts_with(p),
            PathPattern::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Missing or invalid identity. Maps to 401.
    Unauthenticated,
    /// Authenticated but the role is insufficient. Maps to 403.
    Forbidden,
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// The service's fixed path policy. The `/login` prefix also covers the
    /// federated callback, which must be reachable before any token exists.
    pub fn standard() -> Self {
        use PathPattern::{Any, Exact, Prefix};
        use Requirement::{AnyAuthenticated, Public, Role};

        Self::new(vec![
            AccessRule {
                pattern: Prefix("/login"),
                requirement: Public,
            },
            AccessRule {
                pattern: Exact("/"),
                requirement: Public,
            },
            AccessRule {
                pattern: Exact("/join"),
                requirement: Public,
            },
            AccessRule {
                pattern: Exact("/user"),
                requirement: Public,
            },
            AccessRule {
                pattern: Exact("/admin"),
                requirement: Role(RoleClass::Admin),
            },
            AccessRule {
                pattern: Exact("/check-login"),
                requirement: AnyAuthenticated,
            },
            AccessRule {
                pattern: Any,
                requirement: AnyAuthenticated,
            },
        ])
    }

    /// First-match-wins over the ordered rules. A table without a catch-all
    /// falls back to requiring any authenticated principal.
    pub fn evaluate(&self, path: &str, principal: Option<&Principal>) -> Decision {
        for rule in &self.rules {
            if rule.pattern.matches(path) {
                return Self::decide(rule.requirement, principal);
            }
        }
        Self::decide(Requirement::AnyAuthenticated, principal)
    }

    fn decide(requirement: Requirement, principal: Option<&Principal>) -> Decision {
        match requirement {
            Requirement::Public => Decision::Allow,
            Requirement::AnyAuthenticated => match principal {
                Some(_) => Decision::Allow,
                None => Decision::Unauthenticated,
            },
            Requirement::Role(required) => match principal {
                Some(p) if p.role == required => Decision::Allow,
                Some(_) => Decision::Forbidden,
                None => Decision::Unauthenticated,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Principal {
        Principal::new("root", RoleClass::Admin)
    }

    fn user() -> Principal {
        Principal::new("google_108177", RoleClass::User)
    }

    #[test]
    fn public_paths_need_no_principal() {
        let policy = AccessPolicy::standard();
        for path in ["/login", "/login/federated/callback", "/", "/join", "/user"] {
            assert_eq!(policy.evaluate(path, None), Decision::Allow, "{path}");
        }
    }

    #[test]
    fn admin_path_rejects_users_and_anonymous_differently() {
        let policy = AccessPolicy::standard();
        assert_eq!(policy.evaluate("/admin", Some(&admin())), Decision::Allow);
        assert_eq!(policy.evaluate("/admin", Some(&user())), Decision::Forbidden);
        assert_eq!(policy.evaluate("/admin", None), Decision::Unauthenticated);
    }

    #[test]
    fn check_login_accepts_any_principal() {
        let policy = AccessPolicy::standard();
        assert_eq!(
            policy.evaluate("/check-login", None),
            Decision::Unauthenticated
        );
        assert_eq!(
            policy.evaluate("/check-login", Some(&user())),
            Decision::Allow
        );
        assert_eq!(
            policy.evaluate("/check-login", Some(&admin())),
            Decision::Allow
        );
    }

    #[test]
    fn unlisted_paths_default_to_any_authenticated() {
        let policy = AccessPolicy::standard();
        assert_eq!(
            policy.evaluate("/uncharted", None),
            Decision::Unauthenticated
        );
        assert_eq!(policy.evaluate("/uncharted", Some(&admin())), Decision::Allow);
        assert_eq!(policy.evaluate("/uncharted", Some(&user())), Decision::Allow);
    }

    #[test]
    fn first_match_wins() {
        // An early permissive rule shadows a later restrictive one.
        let policy = AccessPolicy::new(vec![
            AccessRule {
                pattern: PathPattern::Exact("/admin"),
                requirement: Requirement::Public,
            },
            AccessRule {
                pattern: PathPattern::Exact("/admin"),
                requirement: Requirement::Role(RoleClass::Admin),
            },
        ]);
        assert_eq!(policy.evaluate("/admin", None), Decision::Allow);
    }

    #[test]
    fn tables_without_a_catch_all_still_require_authentication() {
        let policy = AccessPolicy::new(vec![AccessRule {
            pattern: PathPattern::Exact("/"),
            requirement: Requirement::Public,
        }]);
        assert_eq!(
            policy.evaluate("/elsewhere", None),
            Decision::Unauthenticated
        );
        assert_eq!(policy.evaluate("/elsewhere", Some(&user())), Decision::Allow);
    }
}
