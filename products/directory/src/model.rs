use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub team: String,
    /// ISO-8601 date or date-time, kept as delivered.
    pub join_date: String,
    pub status: EmployeeStatus,
}

impl Employee {
    /// Join date as `YYYY-MM-DD`, falling back to the raw value when it
    /// does not parse.
    pub fn join_date_display(&self) -> String {
        let raw = self.join_date.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return stamp.date_naive().format("%Y-%m-%d").to_string();
        }
        raw.to_string()
    }

    /// First character of the name, used as an avatar placeholder.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmployeeGroup {
    pub id: i64,
    pub name: String,
    /// Cached member count; not derived from the live collection.
    pub count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    #[serde(rename = "onleave")]
    OnLeave,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "onleave",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "재직 중",
            Self::Inactive => "퇴사",
            Self::OnLeave => "휴직 중",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employee status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for EmployeeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "onleave" => Ok(Self::OnLeave),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Employee {
        Employee {
            id: 1,
            name: "김철수".into(),
            email: "kim.cs@company.com".into(),
            phone: "010-1234-5678".into(),
            position: "선임 개발자".into(),
            department: "개발팀".into(),
            team: "프론트엔드".into(),
            join_date: "2020-03-15".into(),
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn employee_uses_camel_case_on_the_wire() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["joinDate"], "2020-03-15");
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn onleave_status_deserializes() {
        let mut raw = serde_json::to_value(sample()).unwrap();
        raw["status"] = json!("onleave");
        let employee: Employee = serde_json::from_value(raw).unwrap();
        assert_eq!(employee.status, EmployeeStatus::OnLeave);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut raw = serde_json::to_value(sample()).unwrap();
        raw["status"] = json!("retired");
        assert!(serde_json::from_value::<Employee>(raw).is_err());
        assert!("retired".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(EmployeeStatus::Active.label(), "재직 중");
        assert_eq!(EmployeeStatus::Inactive.label(), "퇴사");
        assert_eq!(EmployeeStatus::OnLeave.label(), "휴직 중");
    }

    #[test]
    fn join_date_display_normalizes_timestamps() {
        let mut employee = sample();
        assert_eq!(employee.join_date_display(), "2020-03-15");
        employee.join_date = "2021-01-10T09:30:00Z".into();
        assert_eq!(employee.join_date_display(), "2021-01-10");
        employee.join_date = "someday".into();
        assert_eq!(employee.join_date_display(), "someday");
    }
}
