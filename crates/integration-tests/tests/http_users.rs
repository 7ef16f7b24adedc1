//! User API end to end.

#![allow(clippy::unwrap_used)]

use fruitvendor_core::{Address, Client, Error, User, UserId, UserService};
use fruitvendor_integration_tests::TestServer;

#[test]
fn test_user_lifecycle() {
    let server = TestServer::start();
    let service = server.client().user_service();
    let id = UserId::new("u1");

    let mut user = User {
        name: "Green".to_string(),
        card_id: "4111".to_string(),
        address: Some(Address {
            city: "Fresno".to_string(),
            zip_code: "93650".to_string(),
            ..Address::default()
        }),
        ..User::new("u1")
    };
    service.create_user(&mut user).unwrap();
    assert_eq!(service.user(&id).unwrap(), user);

    let patch = User {
        name: "Blue".to_string(),
        ..User::default()
    };
    let updated = service.update_user(&id, &patch).unwrap();
    assert_eq!(updated.name, "Blue");
    assert!(updated.address.is_none());
    assert!(updated.mod_time >= user.mod_time);

    service.delete_user(&id).unwrap();
    assert!(matches!(service.user(&id), Err(Error::UserNotFound)));
    assert!(matches!(service.delete_user(&id), Err(Error::UserNotFound)));
}

#[test]
fn test_user_conflicts() {
    let server = TestServer::start();
    let service = server.client().user_service();

    service.create_user(&mut User::new("u1")).unwrap();
    assert!(matches!(
        service.create_user(&mut User::new("u1")),
        Err(Error::UserExists)
    ));
    assert!(matches!(
        service.create_user(&mut User::default()),
        Err(Error::UserIdRequired)
    ));
}

#[test]
fn test_listing_users_is_not_implemented() {
    let server = TestServer::start();
    let service = server.client().user_service();

    service.create_user(&mut User::new("u1")).unwrap();
    assert!(matches!(service.users(), Err(Error::NotImplemented)));
}
