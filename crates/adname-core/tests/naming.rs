use chrono::TimeZone;
use chrono::Utc;
use uuid::Uuid;

use adname_core::convert::{DirectoryValue, PropertyValue};
use adname_core::{
    AdsObjectName, AdsPath, AdsProvider, DirectoryProperty, Dn, GuidName, LdapName,
    NamingAttribute, Rdn, SearchFilter, SidName, UserAccountControl,
};

#[test]
fn test_escaped_name_flows_through_dn_and_path() {
    let name = LdapName::new("Doe, John").unwrap();
    let rdn = Rdn::new(NamingAttribute::Cn, name);
    let dn = Dn::parse("OU=Users,DC=domain,DC=com")
        .unwrap()
        .prepend([rdn])
        .unwrap();
    assert_eq!(dn.to_string(), r"CN=Doe\, John,OU=Users,DC=domain,DC=com");

    let path = AdsPath::with_server("server.domain.com", dn.clone());
    assert_eq!(
        path.to_string(),
        r"LDAP://server.domain.com/CN=Doe\, John,OU=Users,DC=domain,DC=com"
    );

    // the escaped comma survives a parse of the rendered forms
    assert_eq!(Dn::parse(&dn.to_string()).unwrap(), dn);
    assert_eq!(AdsPath::parse(&path.to_string()).unwrap(), path);
}

#[test]
fn test_server_qualified_path_decomposes() {
    let path = AdsPath::parse("GC://server.domain.com/CN=John,OU=Users,DC=domain,DC=com").unwrap();
    assert_eq!(path.provider(), AdsProvider::Gc);
    assert_eq!(path.server(), Some("server.domain.com"));

    let AdsObjectName::Dn(dn) = path.object_name() else {
        panic!("expected a DN object name");
    };
    assert_eq!(dn.fqdn(), Some("domain.com"));
    assert_eq!(dn.parent().unwrap().to_string(), "OU=Users,DC=domain,DC=com");
}

#[test]
fn test_guid_and_sid_bound_paths() {
    let guid = GuidName::from(Uuid::parse_str("3764cbc6-c740-46e3-8291-2c1d7ca3cfa1").unwrap());
    let path = AdsPath::new(guid);
    assert_eq!(
        path.to_string(),
        "LDAP://<GUID=3764cbc6-c740-46e3-8291-2c1d7ca3cfa1>"
    );
    assert_eq!(AdsPath::parse(&path.to_string()).unwrap(), path);

    let sid = SidName::parse("<SID=S-1-5-21-1004336348-1177238915-682003330-512>").unwrap();
    let path = AdsPath::with_provider(AdsProvider::Ldap, sid);
    assert_eq!(
        path.to_string(),
        "LDAP://<SID=S-1-5-21-1004336348-1177238915-682003330-512>"
    );
}

#[test]
fn test_root_dse_round_trip() {
    let path = AdsPath::root_dse();
    assert_eq!(path.to_string(), "LDAP://RootDSE");
    assert_eq!(AdsPath::parse("LDAP://RootDSE").unwrap(), path);
}

#[test]
fn test_guid_filter_built_from_property_catalogue() {
    let guid = Uuid::parse_str("3764cbc6-c740-46e3-8291-2c1d7ca3cfa1").unwrap();
    let property = DirectoryProperty::ObjectGuid;

    let filter = SearchFilter::equality(
        property.name(),
        property.create_search_filter_string(&PropertyValue::Guid(guid)),
    )
    .and(SearchFilter::equality(
        DirectoryProperty::ObjectClass.name(),
        "user",
    ));

    assert_eq!(
        filter.to_string(),
        r"(&(objectGUID=\c6\cb\64\37\40\c7\e3\46\82\91\2c\1d\7c\a3\cf\a1)(objectClass=user))"
    );
}

#[test]
fn test_member_values_survive_the_wire() {
    let property = DirectoryProperty::Member;
    assert!(property.multivalued());

    let dn = Dn::parse("CN=John,OU=Users,DC=domain,DC=com").unwrap();
    let wire = property.convert_to_directory_value(&PropertyValue::Dn(dn.clone()));
    assert_eq!(
        wire,
        DirectoryValue::String("CN=John,OU=Users,DC=domain,DC=com".into())
    );

    let back = property.convert_from_directory_value(Some(&wire)).unwrap();
    assert_eq!(back, Some(PropertyValue::Dn(dn)));
}

#[test]
fn test_account_expiry_survives_the_wire() {
    let expires = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let property = DirectoryProperty::AccountExpires;

    let wire = property.convert_to_directory_value(&PropertyValue::DateTime(expires));
    let back = property.convert_from_directory_value(Some(&wire)).unwrap();
    assert_eq!(back, Some(PropertyValue::DateTime(expires)));
}

#[test]
fn test_account_control_survives_the_wire() {
    let flags = UserAccountControl::NORMAL_ACCOUNT | UserAccountControl::DONT_EXPIRE_PASSWD;
    let property = DirectoryProperty::UserAccountControl;

    let wire = property.convert_to_directory_value(&PropertyValue::UserAccountControl(flags));
    let back = property.convert_from_directory_value(Some(&wire)).unwrap();
    assert_eq!(back, Some(PropertyValue::UserAccountControl(flags)));
}

#[test]
fn test_serde_shapes_are_plain_strings() {
    let dn = Dn::parse("CN=John,OU=Users,DC=domain,DC=com").unwrap();
    let path = AdsPath::with_server("server", dn.clone());

    assert_eq!(
        serde_json::to_string(&dn).unwrap(),
        "\"CN=John,OU=Users,DC=domain,DC=com\""
    );
    assert_eq!(
        serde_json::to_string(&path).unwrap(),
        "\"LDAP://server/CN=John,OU=Users,DC=domain,DC=com\""
    );
}
