/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::types::{Grant, Type};

pub use aws_sdk_s3::types::{BucketVersioningStatus, CorsRule, LifecycleRule, Tag};

/// URI fragments of the predefined S3 groups that grant access outside the bucket owner's account.
const PUBLIC_GROUP_URI_FRAGMENTS: [&str; 2] = ["AllUsers", "AuthenticatedUsers"];

/// The kind of entity an ACL grant applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GranteeType {
    /// A canonical user ID
    CanonicalUser,

    /// An email address of an AWS account
    AmazonCustomerByEmail,

    /// One of the predefined S3 groups, identified by URI
    Group,

    /// A grantee type this library does not know about, kept verbatim
    Unknown(String),
}

impl GranteeType {
    /// Returns the grantee type as it appears in the S3 API.
    pub fn as_str(&self) -> &str {
        match self {
            GranteeType::CanonicalUser => "CanonicalUser",
            GranteeType::AmazonCustomerByEmail => "AmazonCustomerByEmail",
            GranteeType::Group => "Group",
            GranteeType::Unknown(other) => other,
        }
    }
}

impl From<&Type> for GranteeType {
    fn from(value: &Type) -> Self {
        match value {
            Type::CanonicalUser => GranteeType::CanonicalUser,
            Type::AmazonCustomerByEmail => GranteeType::AmazonCustomerByEmail,
            Type::Group => GranteeType::Group,
            other => GranteeType::Unknown(other.as_str().to_owned()),
        }
    }
}

/// The entity an ACL grant applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grantee {
    /// Kind of grantee
    pub grantee_type: GranteeType,

    /// Group URI, set for [`GranteeType::Group`] grantees
    pub uri: Option<String>,

    /// Canonical user ID
    pub id: Option<String>,

    /// Display name of the grantee
    pub display_name: Option<String>,

    /// Email address of the grantee
    pub email_address: Option<String>,
}

impl Grantee {
    /// True when this grantee is the `AllUsers` or `AuthenticatedUsers` predefined group.
    pub fn is_public_group(&self) -> bool {
        self.grantee_type == GranteeType::Group
            && self.uri.as_deref().is_some_and(|uri| {
                PUBLIC_GROUP_URI_FRAGMENTS
                    .iter()
                    .any(|fragment| uri.contains(fragment))
            })
    }
}

/// A single entry of a bucket access control list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclGrant {
    /// Who the permission is granted to
    pub grantee: Grantee,

    /// The granted permission, e.g. `READ` or `FULL_CONTROL`
    pub permission: String,
}

impl AclGrant {
    /// True when the grant gives access to everyone or to any authenticated AWS user.
    pub fn is_public(&self) -> bool {
        self.grantee.is_public_group()
    }
}

impl From<&Grant> for AclGrant {
    fn from(value: &Grant) -> Self {
        let grantee = value.grantee();
        AclGrant {
            grantee: Grantee {
                grantee_type: grantee
                    .map(|g| GranteeType::from(g.r#type()))
                    .unwrap_or_else(|| GranteeType::Unknown(String::new())),
                uri: grantee.and_then(|g| g.uri()).map(str::to_owned),
                id: grantee.and_then(|g| g.id()).map(str::to_owned),
                display_name: grantee.and_then(|g| g.display_name()).map(str::to_owned),
                email_address: grantee.and_then(|g| g.email_address()).map(str::to_owned),
            },
            permission: value
                .permission()
                .map(|p| p.as_str().to_owned())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{AclGrant, GranteeType};
    use aws_sdk_s3::types::{Grant, Grantee, Permission, Type};

    fn grant(grantee_type: Type, uri: Option<&str>) -> Grant {
        Grant::builder()
            .grantee(
                Grantee::builder()
                    .r#type(grantee_type)
                    .set_uri(uri.map(str::to_owned))
                    .build()
                    .unwrap(),
            )
            .permission(Permission::Read)
            .build()
    }

    #[test]
    fn test_grant_conversion() {
        let acl = AclGrant::from(&grant(
            Type::Group,
            Some("http://acs.amazonaws.com/groups/s3/LogDelivery"),
        ));
        assert_eq!(GranteeType::Group, acl.grantee.grantee_type);
        assert_eq!(
            Some("http://acs.amazonaws.com/groups/s3/LogDelivery"),
            acl.grantee.uri.as_deref()
        );
        assert_eq!("READ", acl.permission);
        assert!(!acl.is_public());
    }

    #[test]
    fn test_public_groups() {
        let all_users = AclGrant::from(&grant(
            Type::Group,
            Some("http://acs.amazonaws.com/groups/global/AllUsers"),
        ));
        assert!(all_users.is_public());

        let authenticated = AclGrant::from(&grant(
            Type::Group,
            Some("http://acs.amazonaws.com/groups/global/AuthenticatedUsers"),
        ));
        assert!(authenticated.is_public());
    }

    #[test]
    fn test_public_uri_requires_group_type() {
        let user = AclGrant::from(&grant(
            Type::CanonicalUser,
            Some("http://acs.amazonaws.com/groups/global/AllUsers"),
        ));
        assert!(!user.is_public());
    }

    #[test]
    fn test_grant_without_grantee() {
        let acl = AclGrant::from(&Grant::builder().build());
        assert_eq!(GranteeType::Unknown(String::new()), acl.grantee.grantee_type);
        assert!(acl.permission.is_empty());
        assert!(!acl.is_public());
    }
}
