//! Fixed demo data served by the in-memory provider.

use crate::model::{Employee, EmployeeGroup, EmployeeStatus};

/// Group id to department name. Ids outside this table are unrecognized.
const GROUP_DEPARTMENTS: [(i64, &str); 6] = [
    (1, "개발팀"),
    (2, "디자인팀"),
    (3, "마케팅팀"),
    (4, "영업팀"),
    (5, "인사팀"),
    (6, "경영지원팀"),
];

pub fn department_for_group(group_id: i64) -> Option<&'static str> {
    GROUP_DEPARTMENTS
        .iter()
        .find(|(id, _)| *id == group_id)
        .map(|(_, name)| *name)
}

pub fn groups() -> Vec<EmployeeGroup> {
    [
        (1, "개발팀", 24),
        (2, "디자인팀", 12),
        (3, "마케팅팀", 8),
        (4, "영업팀", 15),
        (5, "인사팀", 6),
        (6, "경영지원팀", 10),
    ]
    .into_iter()
    .map(|(id, name, count)| EmployeeGroup {
        id,
        name: name.to_string(),
        count,
    })
    .collect()
}

pub fn employees() -> Vec<Employee> {
    use EmployeeStatus::{Active, Inactive, OnLeave};

    [
        (1, "김철수", "kim.cs", "010-1234-5678", "선임 개발자", "개발팀", "프론트엔드", "2020-03-15", Active),
        (2, "이영희", "lee.yh", "010-2345-6789", "UX 디자이너", "디자인팀", "UX/UI", "2019-07-22", Active),
        (3, "박지훈", "park.jh", "010-3456-7890", "백엔드 개발자", "개발팀", "백엔드", "2021-01-10", Active),
        (4, "최미영", "choi.my", "010-4567-8901", "마케팅 매니저", "마케팅팀", "디지털 마케팅", "2018-11-05", OnLeave),
        (5, "정민우", "jung.mw", "010-5678-9012", "영업 담당자", "영업팀", "국내영업", "2022-05-20", Active),
        (6, "강지영", "kang.jy", "010-6789-0123", "HR 매니저", "인사팀", "채용", "2017-09-01", Active),
        (7, "홍길동", "hong.gd", "010-7890-1234", "시니어 개발자", "개발팀", "모바일", "2016-04-12", Inactive),
        (8, "송민지", "song.mj", "010-8901-2345", "그래픽 디자이너", "디자인팀", "그래픽", "2020-08-17", Active),
        (9, "임현우", "lim.hw", "010-9012-3456", "데이터 분석가", "개발팀", "데이터", "2019-12-05", Active),
        (10, "오수진", "oh.sj", "010-0123-4567", "콘텐츠 마케터", "마케팅팀", "콘텐츠", "2021-06-30", Active),
        (11, "윤태호", "yoon.th", "010-9876-5432", "해외 영업 담당자", "영업팀", "해외영업", "2018-03-22", Active),
        (12, "서지은", "seo.je", "010-8765-4321", "경영 지원", "경영지원팀", "재무", "2017-11-15", Active),
        (13, "신동욱", "shin.dw", "010-7654-3210", "플랫폼 개발자", "개발팀", "인프라", "2022-02-10", Active),
        (14, "권혜진", "kwon.hj", "010-6543-2109", "제품 디자이너", "디자인팀", "제품", "2020-05-07", OnLeave),
        (15, "남기현", "nam.kh", "010-5432-1098", "소셜 미디어 전문가", "마케팅팀", "소셜미디어", "2019-09-20", Active),
    ]
    .into_iter()
    .map(
        |(id, name, mailbox, phone, position, department, team, join_date, status)| Employee {
            id,
            name: name.into(),
            email: format!("{mailbox}@company.com"),
            phone: phone.into(),
            position: position.into(),
            department: department.into(),
            team: team.into(),
            join_date: join_date.into(),
            status,
        },
    )
    .collect()
}

/// Employees of a group, or everyone when the id is absent or unknown.
pub fn employees_in_group(group_id: Option<i64>) -> Vec<Employee> {
    let all = employees();
    match group_id.and_then(department_for_group) {
        Some(department) => all
            .into_iter()
            .filter(|employee| employee.department == department)
            .collect(),
        None => all,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn employee_ids_are_unique() {
        let all = employees();
        let ids: HashSet<_> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), all.len());
        assert_eq!(all.len(), 15);
    }

    #[test]
    fn known_group_narrows_to_its_department() {
        let design = employees_in_group(Some(2));
        assert_eq!(design.len(), 3);
        assert!(design.iter().all(|e| e.department == "디자인팀"));
    }

    #[test]
    fn unknown_or_missing_group_returns_everyone() {
        assert_eq!(employees_in_group(None).len(), 15);
        assert_eq!(employees_in_group(Some(42)).len(), 15);
    }
}
