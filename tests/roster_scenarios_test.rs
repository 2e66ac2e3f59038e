use anyhow::Result;
use rollcall::config::Config;
use rollcall_core::{CoreError, GradeMap, NewStudent, Roster, StudentUpdate};

fn seeded_roster() -> Result<Roster> {
    Config::default().build_roster()
}

fn eligible_names(roster: &Roster, code: &str) -> Vec<String> {
    roster
        .eligible_students(code)
        .iter()
        .map(|s| s.name.clone())
        .collect()
}

#[test]
fn test_default_seed_eligibility() -> Result<()> {
    let roster = seeded_roster()?;

    assert_eq!(roster.courses().len(), 3);
    assert_eq!(roster.students().len(), 5);
    for student in roster.students() {
        assert!(student.is_enrolled("CS101"));
        assert!(student.is_enrolled("MATH201"));
        assert!(!student.is_enrolled("ENG101"));
    }

    assert!(roster.eligible_students("CS101").is_empty());
    assert_eq!(roster.eligible_students("ENG101").len(), 5);
    Ok(())
}

#[test]
fn test_enrolling_student_one_in_eng101() -> Result<()> {
    let mut roster = seeded_roster()?;

    roster.enroll("S001", "ENG101")?;

    assert!(roster.find_student("S001").unwrap().is_enrolled("ENG101"));
    assert_eq!(
        eligible_names(&roster, "ENG101"),
        vec!["Student 2", "Student 3", "Student 4", "Student 5"]
    );
    Ok(())
}

#[test]
fn test_enroll_twice_matches_enroll_once() -> Result<()> {
    let mut once = seeded_roster()?;
    let mut twice = seeded_roster()?;

    once.enroll("S003", "ENG101")?;
    twice.enroll("S003", "ENG101")?;
    twice.enroll("S003", "ENG101")?;

    assert_eq!(
        once.find_student("S003").unwrap().enrolled_courses(),
        twice.find_student("S003").unwrap().enrolled_courses()
    );
    Ok(())
}

#[test]
fn test_duplicate_add_leaves_roster_unchanged() -> Result<()> {
    let mut roster = seeded_roster()?;
    let before = roster.students().len();

    let err = roster
        .create_student(NewStudent::new("S002", "Impostor", "x@y.z", "Art"))
        .unwrap_err();

    assert_eq!(err, CoreError::DuplicateId { id: "S002".into() });
    assert_eq!(roster.students().len(), before);
    assert_eq!(roster.find_student("S002").unwrap().name, "Student 2");
    Ok(())
}

#[test]
fn test_grades_are_replaced_not_merged() -> Result<()> {
    let mut roster = seeded_roster()?;

    roster.save_grades("S004", GradeMap::from([("CS101".into(), "A".to_string())]))?;
    roster.save_grades("S004", GradeMap::from([("MATH201".into(), "B".to_string())]))?;

    assert_eq!(
        roster.find_student("S004").unwrap().grades(),
        &GradeMap::from([("MATH201".into(), "B".to_string())])
    );
    Ok(())
}

#[test]
fn test_updating_major_keeps_id_enrollment_and_grades() -> Result<()> {
    let mut roster = seeded_roster()?;
    roster.save_grades("S005", GradeMap::from([("CS101".into(), "C".to_string())]))?;
    let before = roster.find_student("S005").unwrap().clone();

    roster.update_student(
        "S005",
        StudentUpdate {
            major: "Marine Biology".into(),
            ..StudentUpdate::from(&before)
        },
    )?;

    let after = roster.find_student("S005").unwrap();
    assert_eq!(after.major, "Marine Biology");
    assert_eq!(after.id(), before.id());
    assert_eq!(after.enrolled_courses(), before.enrolled_courses());
    assert_eq!(after.grades(), before.grades());
    Ok(())
}

#[test]
fn test_dangling_references_are_tolerated() -> Result<()> {
    let mut roster = seeded_roster()?;

    // Neither the course nor the grade key exists in the catalogue
    roster.enroll("S001", "ART999")?;
    roster.save_grades("S001", GradeMap::from([("HIST100".into(), "D".to_string())]))?;

    let student = roster.find_student("S001").unwrap();
    assert!(student.is_enrolled("ART999"));
    assert_eq!(student.grade("HIST100"), Some("D"));

    let codes: Vec<_> = roster
        .enrolled_courses(student)
        .iter()
        .map(|c| c.code().to_string())
        .collect();
    assert_eq!(codes, vec!["CS101", "MATH201"]);
    Ok(())
}
