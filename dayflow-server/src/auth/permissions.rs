//! Access policy
//!
//! Every authorization decision goes through [`authorize`]. Handlers name
//! the resource and action and pass the owner of the record when there is
//! one; the role table below decides.
//!
//! | Resource | Action | employee | hr | admin |
//! |----------|--------|----------|----|-------|
//! | Employee | List, Create | - | yes | yes |
//! | Employee | Read, Update | own | yes | yes |
//! | EmployeePrivileged | Update | - | yes | yes |
//! | EmployeeRole | Create, Update | - | - | yes |
//! | Leave | Create, ListOwn | yes | yes | yes |
//! | Leave | ListAll, Approve | - | yes | yes |
//! | Attendance | ListOwn | yes | yes | yes |
//! | Attendance | ListAll | - | yes | yes |
//! | Payroll | ListOwn | yes | yes | yes |
//! | Payroll | Read | own | yes | yes |
//! | Payroll | ListAll, Create, SetStatus | - | yes | yes |
//! | SalarySlip | Read | own | yes | yes |

use shared::models::Role;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::security_log;

/// What is being accessed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Employee,
    /// job_title, department, hire_date, employment_type, salary
    EmployeePrivileged,
    /// The role column, and creating accounts with an elevated role
    EmployeeRole,
    Leave,
    Attendance,
    Payroll,
    SalarySlip,
}

/// What is being done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    ListOwn,
    ListAll,
    Read,
    Create,
    Update,
    Approve,
    SetStatus,
}

/// Relation between the caller and the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The record belongs to the caller
    Own,
    /// The record belongs to someone else
    Other,
    /// No single owner (collections, creation)
    None,
}

impl Ownership {
    pub fn of(caller_id: i64, owner_id: i64) -> Self {
        if caller_id == owner_id { Self::Own } else { Self::Other }
    }
}

/// Outcome of a policy check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Allowed for the owner only and the caller is not the owner
    NotOwner,
    /// The caller's role is not high enough
    RoleRequired,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// Decide whether `role` may perform `action` on `resource`
pub fn authorize(role: Role, resource: Resource, action: Action, ownership: Ownership) -> Decision {
    use Action::*;
    use Resource::*;

    match (resource, action) {
        (EmployeeRole, Create | Update) => admin_only(role),

        (Leave | Attendance | Payroll, ListOwn) | (Leave, Create) => Decision::Allow,

        (Employee, Read | Update) | (Payroll | SalarySlip, Read) => {
            if role.is_privileged() || ownership == Ownership::Own {
                Decision::Allow
            } else if ownership == Ownership::Other {
                Decision::NotOwner
            } else {
                Decision::RoleRequired
            }
        }

        _ => privileged_only(role),
    }
}

fn admin_only(role: Role) -> Decision {
    if role == Role::Admin {
        Decision::Allow
    } else {
        Decision::RoleRequired
    }
}

fn privileged_only(role: Role) -> Decision {
    if role.is_privileged() {
        Decision::Allow
    } else {
        Decision::RoleRequired
    }
}

impl CurrentUser {
    /// Run the policy for this caller
    ///
    /// `owner` is the user id owning the record, if any.
    ///
    /// # Errors
    ///
    /// 403 `PermissionDenied` for another user's record,
    /// 403 `AdminRequired` when the role is too low.
    pub fn authorize(&self, resource: Resource, action: Action, owner: Option<i64>) -> Result<(), AppError> {
        let ownership = owner.map_or(Ownership::None, |o| Ownership::of(self.id, o));

        match authorize(self.role, resource, action, ownership) {
            Decision::Allow => Ok(()),
            decision => {
                security_log!(
                    "WARN",
                    "access_denied",
                    user_id = self.id,
                    role = self.role.as_str(),
                    resource = format!("{:?}", resource),
                    action = format!("{:?}", action)
                );
                Err(match decision {
                    Decision::NotOwner => AppError::forbidden("Access denied"),
                    _ => AppError::new(shared::error::ErrorCode::AdminRequired),
                })
            }
        }
    }

    /// Policy check without an error, for filtering rather than refusing
    pub fn can(&self, resource: Resource, action: Action, owner: Option<i64>) -> bool {
        let ownership = owner.map_or(Ownership::None, |o| Ownership::of(self.id, o));
        authorize(self.role, resource, action, ownership).is_allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: Role) -> CurrentUser {
        CurrentUser {
            id,
            username: format!("user{id}"),
            role,
        }
    }

    #[test]
    fn employee_reads_only_own_profile() {
        assert_eq!(
            authorize(Role::Employee, Resource::Employee, Action::Read, Ownership::Own),
            Decision::Allow
        );
        assert_eq!(
            authorize(Role::Employee, Resource::Employee, Action::Read, Ownership::Other),
            Decision::NotOwner
        );
        assert_eq!(
            authorize(Role::Employee, Resource::Employee, Action::List, Ownership::None),
            Decision::RoleRequired
        );
    }

    #[test]
    fn hr_manages_everything_but_roles() {
        for (resource, action) in [
            (Resource::Employee, Action::List),
            (Resource::Employee, Action::Create),
            (Resource::EmployeePrivileged, Action::Update),
            (Resource::Leave, Action::Approve),
            (Resource::Leave, Action::ListAll),
            (Resource::Attendance, Action::ListAll),
            (Resource::Payroll, Action::Create),
            (Resource::Payroll, Action::SetStatus),
        ] {
            assert!(authorize(Role::Hr, resource, action, Ownership::None).is_allowed());
        }
        assert_eq!(
            authorize(Role::Hr, Resource::EmployeeRole, Action::Update, Ownership::Other),
            Decision::RoleRequired
        );
        assert!(authorize(Role::Admin, Resource::EmployeeRole, Action::Update, Ownership::Other).is_allowed());
    }

    #[test]
    fn employee_cannot_touch_privileged_fields_even_on_own_profile() {
        assert!(!authorize(Role::Employee, Resource::EmployeePrivileged, Action::Update, Ownership::Own).is_allowed());
        assert!(!authorize(Role::Employee, Resource::EmployeeRole, Action::Update, Ownership::Own).is_allowed());
    }

    #[test]
    fn employee_self_service() {
        for (resource, action) in [
            (Resource::Leave, Action::Create),
            (Resource::Leave, Action::ListOwn),
            (Resource::Attendance, Action::ListOwn),
            (Resource::Payroll, Action::ListOwn),
        ] {
            assert!(authorize(Role::Employee, resource, action, Ownership::None).is_allowed());
        }
        assert!(!authorize(Role::Employee, Resource::Leave, Action::Approve, Ownership::Own).is_allowed());
        assert!(!authorize(Role::Employee, Resource::Payroll, Action::SetStatus, Ownership::Own).is_allowed());
    }

    #[test]
    fn salary_slip_is_owner_or_privileged() {
        assert!(authorize(Role::Employee, Resource::SalarySlip, Action::Read, Ownership::Own).is_allowed());
        assert_eq!(
            authorize(Role::Employee, Resource::SalarySlip, Action::Read, Ownership::Other),
            Decision::NotOwner
        );
        assert!(authorize(Role::Hr, Resource::SalarySlip, Action::Read, Ownership::Other).is_allowed());
    }

    #[test]
    fn current_user_errors_map_to_403() {
        let err = user(1, Role::Employee)
            .authorize(Resource::Payroll, Action::Read, Some(2))
            .unwrap_err();
        assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);
        assert_eq!(err.code, shared::error::ErrorCode::PermissionDenied);

        let err = user(1, Role::Employee)
            .authorize(Resource::Employee, Action::List, None)
            .unwrap_err();
        assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);
        assert_eq!(err.code, shared::error::ErrorCode::AdminRequired);

        assert!(user(1, Role::Employee).authorize(Resource::Payroll, Action::Read, Some(1)).is_ok());
        assert!(user(1, Role::Employee).can(Resource::Employee, Action::Update, Some(1)));
        assert!(!user(1, Role::Employee).can(Resource::EmployeePrivileged, Action::Update, Some(1)));
    }
}
