//! Concrete assignment scenarios exercising the seeder, apportionment, and
//! evaluation primitives together through the public orchestration API.

use cohort_core::domain::{Participant, Position, Program, Session};
use cohort_core::{execute, Assigner, HybridConfig};

fn participant(id: &str, pos: Position, lab: &str) -> Participant {
    Participant::new(id, id, pos, vec![lab.to_string()]).unwrap()
}

// S1: 4 participants, one of each position, distinct labs, a single session
// seating all four together. No repeats are possible with only one session,
// and each participant should count the other three as distinct partners.
#[test]
fn s1_single_session_four_participants() {
    let participants = vec![
        participant("f1", Position::Faculty, "LabA"),
        participant("d1", Position::Doctoral, "LabB"),
        participant("m1", Position::Master, "LabC"),
        participant("b1", Position::Bachelor, "LabD"),
    ];
    let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
    let session = Session::new("s0", 1, 4, 4, ids, None).unwrap();
    let program = Program::new("p", participants, vec![session]).unwrap();

    let result = execute(&program, Assigner::Heuristic, 1).unwrap();
    assert_eq!(result.evaluation.average_repeat_per_person, 0.0);
    for (_, stats) in &result.evaluation.partner_statistics {
        assert_eq!(stats.distinct_partners, 3);
    }
}

// S2: 8 participants, 2 of each position, distinct labs, 2 sessions of two
// groups of 4. Every group should end up with exactly one of each position
// and no lab collisions; the average repeat rate should stay low since the
// theoretical minimum for this shape is 0.
#[test]
fn s2_two_sessions_balanced_groups() {
    let mut participants = Vec::new();
    for (i, pos) in [Position::Faculty, Position::Doctoral, Position::Master, Position::Bachelor]
        .iter()
        .enumerate()
    {
        for j in 0..2 {
            participants.push(participant(&format!("p{i}{j}"), *pos, &format!("Lab{i}{j}")));
        }
    }
    let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
    let sessions = vec![
        Session::new("s0", 2, 4, 4, ids.clone(), None).unwrap(),
        Session::new("s1", 2, 4, 4, ids, None).unwrap(),
    ];
    let program = Program::new("p", participants, sessions).unwrap();

    let config = HybridConfig {
        num_heuristic_seeds: 6,
        generations: 40,
        population_size: 12,
        mutation_rate: 0.08,
        time_budget_seconds: 3.0,
        heuristic_iterations: 100,
    };
    let result = execute(&program, Assigner::Hybrid(config), 3).unwrap();

    for groups in result.solution.sessions() {
        for group in groups {
            assert_eq!(group.len(), 4);
            let mut seen = std::collections::HashSet::new();
            for p in group.participants() {
                assert!(seen.insert(p.position), "duplicate position within a group");
            }
            for (i, a) in group.participants().iter().enumerate() {
                for b in group.participants().iter().skip(i + 1) {
                    assert!(!a.shares_lab_with(b));
                }
            }
        }
    }
    assert!(result.evaluation.average_repeat_per_person >= result.evaluation.theoretical_min_avg_repeat - 1e-9);
}

// S3: 7 participants (1 Faculty, 2 Doctoral, 2 Master, 2 Bachelor), a single
// session with group_num=2, min=3, max=4. The apportioned target matrix
// necessarily seats the only Faculty in the larger group (size 4 has more
// capacity share of the single Faculty unit than size 3).
#[test]
fn s3_uneven_group_sizes_seat_the_sole_faculty_in_the_larger_group() {
    let participants = vec![
        participant("f1", Position::Faculty, "LabA"),
        participant("d1", Position::Doctoral, "LabB"),
        participant("d2", Position::Doctoral, "LabC"),
        participant("m1", Position::Master, "LabD"),
        participant("m2", Position::Master, "LabE"),
        participant("b1", Position::Bachelor, "LabF"),
        participant("b2", Position::Bachelor, "LabG"),
    ];
    let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
    let session = Session::new("s0", 2, 3, 4, ids, None).unwrap();
    let program = Program::new("p", participants, vec![session]).unwrap();

    let result = execute(&program, Assigner::Heuristic, 2).unwrap();
    let groups = result.solution.session(0);
    let mut sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 4]);

    for group in groups {
        if group.len() == 4 {
            assert!(group.participants().iter().any(|p| p.position == Position::Faculty));
        } else {
            assert!(!group.participants().iter().any(|p| p.position == Position::Faculty));
        }
    }
}

// S4: 12 Faculty with globally distinct labs, 3 sessions of 3 groups of 4.
// Every participant is Faculty, so the strict fill pass rejects every
// placement after the first per group and the overflow phase must seat the
// rest -- the scenario this phase exists for. Lab collisions remain
// impossible regardless since no two participants share a lab to begin
// with; each participant can meet at most 9 distinct partners across the
// three sessions (3 groupmates per session).
#[test]
fn s4_all_faculty_forces_the_overflow_phase() {
    let participants: Vec<Participant> = (0..12)
        .map(|i| participant(&format!("f{i}"), Position::Faculty, &format!("Lab{i}")))
        .collect();
    let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
    let sessions = vec![
        Session::new("s0", 3, 4, 4, ids.clone(), None).unwrap(),
        Session::new("s1", 3, 4, 4, ids.clone(), None).unwrap(),
        Session::new("s2", 3, 4, 4, ids, None).unwrap(),
    ];
    let program = Program::new("p", participants, sessions).unwrap();

    let result = execute(&program, Assigner::Heuristic, 4).unwrap();
    assert_eq!(result.solution.num_sessions(), 3);
    for groups in result.solution.sessions() {
        assert_eq!(groups.len(), 3);
        for group in groups {
            assert_eq!(group.len(), 4);
        }
    }
    for (_, stats) in &result.evaluation.partner_statistics {
        assert!(stats.distinct_partners <= 9);
    }
}
