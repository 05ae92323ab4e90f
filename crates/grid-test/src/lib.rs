//! # Test Fixture
//!
//! The shared record set used by `gridquery` integration tests: ten people
//! with string, numeric, date, datetime, and enum-coded fields.

use chrono::{NaiveDate, NaiveDateTime};
use gridquery::{FieldMap, FieldValue};

/// Integer-coded role, the shape a grid enum filter compares against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Ordinary user (discriminant 0).
    User = 0,

    /// Administrator (discriminant 1).
    Admin = 1,
}

/// One fixture record.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    /// Sequential identifier, 1 through 10.
    pub id: u32,

    /// Given name.
    pub name: String,

    /// Family name.
    pub surname: String,

    /// Height in meters.
    pub height: f64,

    /// Date of birth, day granularity.
    pub birthdate: NaiveDate,

    /// Last access, with a time-of-day component.
    pub last_access: NaiveDateTime,

    /// Role.
    pub role: Role,
}

/// The field map for [`Person`], shared by every test.
#[must_use]
pub fn field_map() -> FieldMap<Person> {
    FieldMap::new()
        .field("id", |p: &Person| p.id)
        .field("name", |p: &Person| p.name.clone())
        .field("surname", |p: &Person| p.surname.clone())
        .field("height", |p: &Person| p.height)
        .field("birthdate", |p: &Person| p.birthdate)
        .field("lastAccess", |p: &Person| p.last_access)
        .field("role", |p: &Person| FieldValue::Enum(p.role as i64))
}

/// The ten-person record set.
#[must_use]
pub fn people() -> Vec<Person> {
    vec![
        person(1, "John", "Smith", 1.85, (1969, 6, 3), (2020, 12, 3, 12, 15, 3), Role::User),
        person(2, "Arthur", "Besse", 1.66, (1972, 9, 19), (2020, 10, 18, 17, 31, 3), Role::User),
        person(3, "Peter", "Orno", 1.93, (1969, 5, 3), (2020, 5, 3, 12, 15, 3), Role::User),
        person(4, "Jára", "Cimrman", 1.52, (1985, 6, 14), (2019, 6, 14, 12, 15, 3), Role::Admin),
        person(5, "Ponsonby", "Britt", 1.69, (1988, 2, 16), (2020, 2, 16, 12, 15, 3), Role::User),
        person(6, "George", "Spelvin", 1.73, (1991, 9, 18), (2019, 9, 18, 12, 15, 3), Role::User),
        person(7, "Andreas", "Karavis", 1.45, (1979, 10, 9), (2020, 10, 9, 12, 15, 3), Role::Admin),
        person(8, "Kozma", "Prutkov", 1.85, (1978, 11, 12), (2021, 11, 12, 12, 15, 3), Role::User),
        person(9, "Penelope", "Ashe", 1.89, (1983, 1, 10), (2021, 1, 10, 12, 15, 3), Role::User),
        person(10, "Allegra", "Coleman", 1.74, (1982, 8, 21), (2021, 8, 21, 12, 15, 3), Role::User),
    ]
}

fn person(
    id: u32, name: &str, surname: &str, height: f64, birthdate: (i32, u32, u32),
    last_access: (i32, u32, u32, u32, u32, u32), role: Role,
) -> Person {
    let (year, month, day) = birthdate;
    let (ay, am, ad, hour, minute, second) = last_access;
    Person {
        id,
        name: name.to_string(),
        surname: surname.to_string(),
        height,
        birthdate: NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date"),
        last_access: NaiveDate::from_ymd_opt(ay, am, ad)
            .expect("valid fixture date")
            .and_hms_opt(hour, minute, second)
            .expect("valid fixture time"),
        role,
    }
}
