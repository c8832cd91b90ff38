//! Registration rules applied before a record is created downstream.

use std::fmt;

use super::UserRecord;

/// Fields a registration candidate must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// `email`
    Email,
    /// `hashedPassword`
    Password,
    /// `name`
    Name,
}

impl RequiredField {
    /// First required field absent from `candidate`, checked as
    /// email, password, name. Empty strings count as present.
    #[must_use]
    pub fn first_missing(candidate: &UserRecord) -> Option<Self> {
        if candidate.email.is_none() {
            Some(Self::Email)
        } else if candidate.hashed_password.is_none() {
            Some(Self::Password)
        } else if candidate.name.is_none() {
            Some(Self::Name)
        } else {
            None
        }
    }

    /// JSON field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "hashedPassword",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a registration is refused. Both surface to callers as a bare 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationRejection {
    /// A record with this email already exists.
    #[error("email {email} is already registered")]
    EmailTaken {
        /// The conflicting email.
        email: String,
    },
    /// A required field was absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// The first absent field.
        field: RequiredField,
    },
}

/// Registration result: the store's created record, or a rejection.
pub type RegistrationOutcome = Result<UserRecord, RegistrationRejection>;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn candidate(email: Option<&str>, password: Option<&str>, name: Option<&str>) -> UserRecord {
        UserRecord {
            id: None,
            email: email.map(str::to_owned),
            name: name.map(str::to_owned),
            hashed_password: password.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(candidate(None, None, None), Some(RequiredField::Email))]
    #[case(candidate(Some("c@x.com"), None, None), Some(RequiredField::Password))]
    #[case(candidate(Some("c@x.com"), Some("p2"), None), Some(RequiredField::Name))]
    #[case(candidate(Some("c@x.com"), Some("p2"), Some("C")), None)]
    #[case(candidate(Some(""), Some(""), Some("")), None)]
    fn first_missing_follows_field_order(
        #[case] candidate: UserRecord,
        #[case] expected: Option<RequiredField>,
    ) {
        assert_eq!(RequiredField::first_missing(&candidate), expected);
    }

    #[test]
    fn rejection_messages_name_the_problem() {
        let taken = RegistrationRejection::EmailTaken {
            email: "a@x.com".to_owned(),
        };
        assert_eq!(taken.to_string(), "email a@x.com is already registered");

        let missing = RegistrationRejection::MissingField {
            field: RequiredField::Password,
        };
        assert_eq!(missing.to_string(), "missing required field: hashedPassword");
    }
}
