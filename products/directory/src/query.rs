use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::{
    filter::FilterState,
    model::{Employee, EmployeeStatus},
};

/// Employee attribute a list can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Name,
    Email,
    Phone,
    Position,
    Department,
    Team,
    JoinDate,
    Status,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Position => "position",
            Self::Department => "department",
            Self::Team => "team",
            Self::JoinDate => "joinDate",
            Self::Status => "status",
        }
    }

    /// Ordinal comparison of the raw field values.
    pub fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Email => a.email.cmp(&b.email),
            Self::Phone => a.phone.cmp(&b.phone),
            Self::Position => a.position.cmp(&b.position),
            Self::Department => a.department.cmp(&b.department),
            Self::Team => a.team.cmp(&b.team),
            Self::JoinDate => a.join_date.cmp(&b.join_date),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseQueryError {
    #[error("unknown sort field `{0}`")]
    SortField(String),
    #[error("unknown sort direction `{0}` (use asc|desc)")]
    SortDirection(String),
}

impl FromStr for SortField {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "position" => Ok(Self::Position),
            "department" => Ok(Self::Department),
            "team" => Ok(Self::Team),
            "joinDate" | "join_date" => Ok(Self::JoinDate),
            "status" => Ok(Self::Status),
            other => Err(ParseQueryError::SortField(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseQueryError::SortDirection(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Key order for a stable sort. Descending reverses the keys only, so
    /// equal keys keep their incoming relative order in both directions.
    pub fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        match self.direction {
            SortDirection::Asc => self.field.compare(a, b),
            SortDirection::Desc => self.field.compare(b, a),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::Name, SortDirection::Asc)
    }
}

/// Control parameters of a list view.
///
/// Updates never mutate in place; each builder returns the next query and
/// the owner decides what to recompute by comparing old and new.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryQuery {
    search: String,
    filters: FilterState,
    sort: SortSpec,
    page: usize,
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: FilterState::default(),
            sort: SortSpec::default(),
            page: 1,
        }
    }
}

impl DirectoryQuery {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    pub fn with_filters(&self, filters: FilterState) -> Self {
        Self {
            filters,
            ..self.clone()
        }
    }

    pub fn toggle_department(&self, department: &str) -> Self {
        self.with_filters(self.filters.toggle_department(department))
    }

    pub fn toggle_status(&self, status: EmployeeStatus) -> Self {
        self.with_filters(self.filters.toggle_status(status))
    }

    pub fn reset_filters(&self) -> Self {
        self.with_filters(self.filters.reset())
    }

    pub fn with_sort(&self, sort: SortSpec) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Column header behaviour: the active field flips direction, any other
    /// field becomes active in ascending order.
    pub fn sort_by(&self, field: SortField) -> Self {
        let sort = if self.sort.field == field {
            SortSpec::new(field, self.sort.direction.flipped())
        } else {
            SortSpec::new(field, SortDirection::Asc)
        };
        self.with_sort(sort)
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// True when both queries select and order the same employees, i.e.
    /// they may differ only in page.
    pub fn same_criteria(&self, other: &DirectoryQuery) -> bool {
        self.search == other.search && self.filters == other.filters && self.sort == other.sort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sorts_by_name_ascending_on_first_page() {
        let query = DirectoryQuery::default();
        assert_eq!(query.sort(), SortSpec::new(SortField::Name, SortDirection::Asc));
        assert_eq!(query.page(), 1);
        assert!(query.search().is_empty());
    }

    #[test]
    fn sort_by_same_field_flips_direction() {
        let query = DirectoryQuery::default().sort_by(SortField::Name);
        assert_eq!(query.sort().direction, SortDirection::Desc);
        let query = query.sort_by(SortField::Name);
        assert_eq!(query.sort().direction, SortDirection::Asc);
    }

    #[test]
    fn sort_by_new_field_starts_ascending() {
        let query = DirectoryQuery::default()
            .sort_by(SortField::Name)
            .sort_by(SortField::JoinDate);
        assert_eq!(
            query.sort(),
            SortSpec::new(SortField::JoinDate, SortDirection::Asc)
        );
    }

    #[test]
    fn updates_leave_the_original_untouched() {
        let original = DirectoryQuery::default();
        let next = original.with_search("개발").toggle_status(EmployeeStatus::Active);
        assert!(original.search().is_empty());
        assert!(!original.filters().is_active());
        assert_eq!(next.search(), "개발");
        assert_eq!(next.filters().active_count(), 1);
    }

    #[test]
    fn page_changes_keep_the_same_criteria() {
        let query = DirectoryQuery::default().with_search("kim");
        assert!(query.same_criteria(&query.with_page(3)));
        assert!(!query.same_criteria(&query.with_search("lee")));
        assert!(!query.same_criteria(&query.sort_by(SortField::Team)));
    }

    #[test]
    fn sort_fields_parse_from_wire_names() {
        assert_eq!("joinDate".parse(), Ok(SortField::JoinDate));
        assert_eq!("join_date".parse(), Ok(SortField::JoinDate));
        assert_eq!("status".parse(), Ok(SortField::Status));
        assert_eq!(
            "salary".parse::<SortField>(),
            Err(ParseQueryError::SortField("salary".into()))
        );
        assert_eq!("DESC".parse(), Ok(SortDirection::Desc));
        assert!("down".parse::<SortDirection>().is_err());
    }
}
