// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sample resume used when no data file is given, and as a test fixture.

use super::model::{
    Achievement, Certificate, Education, Project, ResumeData, TechnicalSkills,
};

/// A complete, fictional resume exercising every section with links.
pub fn sample_resume() -> ResumeData {
    ResumeData {
        full_name: "Jordan Example".into(),
        email: "jordan.example@example.com".into(),
        phone: "+1-555-0142".into(),
        linkedin: "linkedin.com/in/jordan-example".into(),
        github: "github.com/jordan-example".into(),
        leetcode: "jordan-example".into(),
        summary: "Computer Science student focused on systems programming and full-stack \
                  development, with a strong foundation in C, Python and Rust. Experienced \
                  with web technologies, relational and document databases, and shipping \
                  small production services end to end."
            .into(),
        education: vec![
            Education {
                id: "1".into(),
                institution: "Northfield University".into(),
                degree: "Bachelor of Technology".into(),
                field: "Computer Science".into(),
                start_date: "Sep 2022".into(),
                end_date: "Jun 2026".into(),
                current: true,
                gpa: Some("9.1/10.0".into()),
                coursework: Some(
                    "Computer Architecture, Data Structures, Algorithms, Database Systems, \
                     Operating Systems, Computer Networks"
                        .into(),
                ),
                transcript_link: Some("https://records.example.edu/transcripts/jordan".into()),
            },
            Education {
                id: "2".into(),
                institution: "Lakeside Junior College".into(),
                degree: "Class 12".into(),
                field: "Science".into(),
                start_date: "2020".into(),
                end_date: "2022".into(),
                current: false,
                gpa: Some("94%".into()),
                coursework: Some("Mathematics, Physics, Chemistry".into()),
                transcript_link: None,
            },
        ],
        experience: vec![
            Project {
                id: "1".into(),
                company: "C".into(),
                position: "Ledger Bank Simulator".into(),
                location: "GitHub".into(),
                start_date: "Jun 2023".into(),
                end_date: "Jun 2023".into(),
                current: false,
                description: "Built a banking simulator in C within four weeks. Tuned memory \
                              layout and data structures, improving throughput by 30 percent."
                    .into(),
                project_link: Some("https://github.com/jordan-example/ledger".into()),
            },
            Project {
                id: "2".into(),
                company: "HTML, JavaScript, CSS".into(),
                position: "Sudoku Solver".into(),
                location: "GitHub".into(),
                start_date: "Jan 2024".into(),
                end_date: "Jan 2024".into(),
                current: false,
                description: "Designed an interactive browser-based Sudoku solver. Delivered \
                              instant feedback on every move."
                    .into(),
                project_link: Some("https://github.com/jordan-example/sudoku".into()),
            },
        ],
        work_experience: Vec::new(),
        skills: vec![
            "C".into(),
            "Python".into(),
            "Rust".into(),
            "Git".into(),
            "SQL".into(),
        ],
        technical_skills: TechnicalSkills {
            languages: "C, Python, Rust".into(),
            tools_frameworks: "Git, Docker, Figma".into(),
            web_programming: "HTML, CSS, JavaScript, React".into(),
            databases: "PostgreSQL, MongoDB".into(),
            domain_knowledge: "Backend Development".into(),
        },
        certificates: vec![
            Certificate {
                id: "1".into(),
                name: "Data Structures and Algorithms".into(),
                issuer: "Open Course Network".into(),
                issue_date: "Oct 2023".into(),
                verify_link: Some("https://certs.example.org/verify/dsa-1042".into()),
            },
            Certificate {
                id: "2".into(),
                name: "Introduction to Databases".into(),
                issuer: "Open Course Network".into(),
                issue_date: "Mar 2024".into(),
                verify_link: Some("https://certs.example.org/verify/db-2207".into()),
            },
        ],
        achievements: vec![Achievement {
            id: "1".into(),
            title: "Coding Challenge Finisher".into(),
            description: "Completed the 45-day campus coding challenge, spring 2024.".into(),
            date: Some("Apr 2024".into()),
            verify_link: Some("https://club.example.edu/challenges/2024".into()),
        }],
    }
}
