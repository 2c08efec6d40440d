use job_board::pipeline::applicants::{
    applicant_stats, ApplicantStore, ApplicationId, ApplicationStatus, TransitionPolicy,
};
use job_board::pipeline::fixtures::applicants_from_csv_reader;
use job_board::pipeline::query::{filter, FilterCriteria, Scope, Tab};
use job_board::pipeline::{FixtureError, FixtureSet};

const CSV: &str = "id,name,email,position,location,experience,job_id,job_title,status,match_score,skills,applied_date\n\
app-10, Priya Nair ,priya@example.com,Site Reliability Engineer,Denver CO,6 years,job-1,Senior Software Engineer,interview,87,Rust; Terraform ;AWS,2024-01-20\n\
app-11,Tom Becker,,Junior Designer,,,job-2,Product Designer,,64,,\n";

#[test]
fn csv_rows_become_records() {
    let records = applicants_from_csv_reader(CSV.as_bytes()).expect("import succeeds");
    assert_eq!(records.len(), 2);

    let priya = &records[0];
    assert_eq!(priya.name, "Priya Nair");
    assert_eq!(priya.status, ApplicationStatus::Interview);
    assert_eq!(priya.match_score.value(), 87);
    assert_eq!(priya.skills, vec!["Rust", "Terraform", "AWS"]);

    let tom = &records[1];
    assert_eq!(tom.status, ApplicationStatus::Pending);
    assert!(tom.email.is_empty());
    assert!(tom.skills.is_empty());
}

#[test]
fn imported_records_flow_through_the_pipeline() {
    let records = applicants_from_csv_reader(CSV.as_bytes()).expect("import succeeds");
    let mut store =
        ApplicantStore::new(records, TransitionPolicy::Guarded).expect("unique ids");

    let terraform = filter(
        store.records(),
        &FilterCriteria::new(Tab::All, "TERRAFORM", Scope::from("job-1")),
    );
    assert_eq!(terraform.len(), 1);

    assert!(store.advance(&ApplicationId::from("app-10")).applied());
    let stats = applicant_stats(store.records());
    assert_eq!(stats.count(ApplicationStatus::Hired), 1);
    assert_eq!(stats.hire_rate, "50.0");
}

#[test]
fn out_of_range_score_reports_the_row() {
    let csv = "id,name,position,job_id,job_title,match_score\n\
app-1,Ann,Analyst,job-3,Data Analyst,70\n\
app-2,Bo,Analyst,job-3,Data Analyst,140\n";

    match applicants_from_csv_reader(csv.as_bytes()) {
        Err(FixtureError::InvalidRow { row, .. }) => assert_eq!(row, 3),
        other => panic!("expected invalid row error, got {other:?}"),
    }
}

#[test]
fn unknown_status_is_rejected() {
    let csv = "id,name,position,job_id,job_title,status,match_score\n\
app-1,Ann,Analyst,job-3,Data Analyst,withdrawn,70\n";

    assert!(matches!(
        applicants_from_csv_reader(csv.as_bytes()),
        Err(FixtureError::InvalidRow { row: 2, .. })
    ));
}

#[test]
fn json_fixture_loads_partial_sets() {
    let json = r#"{
        "applicants": [{
            "id": "app-1",
            "name": "Ann Lee",
            "position": "Analyst",
            "job_id": "job-3",
            "job_title": "Data Analyst",
            "status": "reviewed",
            "match_score": 70,
            "applied_date": "2024-02-01"
        }]
    }"#;

    let fixtures = FixtureSet::from_json_reader(json.as_bytes()).expect("valid fixture");
    assert_eq!(fixtures.applicants.len(), 1);
    assert!(fixtures.jobs.is_empty());
    assert_eq!(fixtures.applicants[0].status, ApplicationStatus::Reviewed);
    assert!(fixtures.applicants[0].skills.is_empty());
}
