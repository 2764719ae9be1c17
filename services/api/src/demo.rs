use crate::infra::AssistanceServices;
use chrono::NaiveDate;
use clap::Args;
use fas_core::assistance::{
    Applicant, EligibilityEngine, EmploymentStatus, EvaluationClock, MaritalStatus, NewApplicant,
    NewApplication, NewBenefit, NewScheme, RelationshipType, Scheme, Sex,
};
use fas_core::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate ages as of this date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

struct SchemeSeed {
    name: &'static str,
    criteria: &'static [(&'static str, &'static str)],
    benefits: &'static [(&'static str, f64)],
}

const SCHEMES: &[SchemeSeed] = &[
    SchemeSeed {
        name: "Retrenchment Assistance Scheme",
        criteria: &[("employment_status", "unemployed")],
        benefits: &[("SkillsFuture Credits", 500.0)],
    },
    SchemeSeed {
        name: "Retrenchment Assistance Scheme (families)",
        criteria: &[("employment_status", "unemployed"), ("has_children", "true")],
        benefits: &[("School Meal Vouchers", 200.0), ("CDC Vouchers", 100.0)],
    },
    SchemeSeed {
        name: "Senior Support Scheme",
        criteria: &[("age", ">=60")],
        benefits: &[("Eldercare Grant", 250.0)],
    },
];

struct ApplicantSeed {
    name: &'static str,
    employment_status: EmploymentStatus,
    marital_status: MaritalStatus,
    sex: Sex,
    date_of_birth: &'static str,
}

const APPLICANTS: &[ApplicantSeed] = &[
    ApplicantSeed {
        name: "James",
        employment_status: EmploymentStatus::Unemployed,
        marital_status: MaritalStatus::Married,
        sex: Sex::Male,
        date_of_birth: "1990-07-01",
    },
    ApplicantSeed {
        name: "Mary",
        employment_status: EmploymentStatus::Unemployed,
        marital_status: MaritalStatus::Widowed,
        sex: Sex::Female,
        date_of_birth: "1955-03-12",
    },
    ApplicantSeed {
        name: "Gwen",
        employment_status: EmploymentStatus::Employed,
        marital_status: MaritalStatus::Single,
        sex: Sex::Female,
        date_of_birth: "2016-02-05",
    },
];

/// Seeded applicants in `APPLICANTS` order plus the seeded schemes.
pub(crate) struct DemoData {
    pub(crate) applicants: Vec<Applicant>,
    pub(crate) schemes: Vec<Scheme>,
}

pub(crate) fn seed(services: &AssistanceServices) -> Result<DemoData, AppError> {
    let mut schemes = Vec::with_capacity(SCHEMES.len());
    for seed in SCHEMES {
        let scheme = services.schemes.create(NewScheme {
            name: seed.name.to_string(),
        })?;
        for &(name, value) in seed.criteria {
            services
                .schemes
                .add_criteria(scheme.id, Some(name), Some(value))?;
        }
        for &(name, amount) in seed.benefits {
            services.schemes.add_benefit(NewBenefit {
                scheme_id: scheme.id,
                name: name.to_string(),
                amount,
            })?;
        }
        schemes.push(services.schemes.get(scheme.id)?);
    }

    let applicants = seed_applicants(services, APPLICANTS)?;

    // James is Gwen's parent.
    if let (Some(parent), Some(child)) = (applicants.first(), applicants.get(2)) {
        services
            .applicants
            .link_family_member(parent.id, child.id, RelationshipType::Child)?;
    }

    Ok(DemoData {
        applicants,
        schemes,
    })
}

/// Stops at the first malformed seed.
fn seed_applicants(
    services: &AssistanceServices,
    seeds: &[ApplicantSeed],
) -> Result<Vec<Applicant>, AppError> {
    let mut applicants = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let date_of_birth = crate::infra::parse_date(seed.date_of_birth)
            .map_err(|reason| AppError::SeedData(format!("{}: {reason}", seed.name)))?;
        applicants.push(services.applicants.create(NewApplicant {
            name: seed.name.to_string(),
            employment_status: seed.employment_status,
            marital_status: seed.marital_status,
            sex: seed.sex,
            date_of_birth,
        })?);
    }
    Ok(applicants)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let clock = args
        .today
        .map(EvaluationClock::Fixed)
        .unwrap_or_default();
    let engine = EligibilityEngine::new(clock);
    let services = AssistanceServices::in_memory(engine.clone());
    let data = seed(&services)?;

    println!("Financial assistance eligibility demo (as of {})", clock.today());
    println!("\nSchemes");
    for scheme in &data.schemes {
        let benefits: Vec<String> = scheme
            .benefits
            .iter()
            .map(|benefit| format!("{} ({:.2})", benefit.name, benefit.amount))
            .collect();
        println!("- {}", scheme.name);
        println!("  Benefits: {}", benefits.join(", "));
    }

    for applicant in &data.applicants {
        let family = services.applicants.family(applicant.id)?;
        let available = services
            .schemes
            .list_applicant_available_schemes(applicant.id)?;

        println!(
            "\n{} ({}, {}, born {})",
            applicant.name,
            applicant.employment_status,
            applicant.marital_status,
            applicant
                .date_of_birth
                .map(|date| date.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        let relations: Vec<String> = family
            .relationship_types()
            .map(|relationship| relationship.to_string())
            .collect();
        if !relations.is_empty() {
            println!("  Family: {}", relations.join(", "));
        }
        println!("  Eligible for {} scheme(s)", available.len());

        for scheme in &data.schemes {
            let assessment = engine.assess(scheme, applicant, &family);
            let marker = if assessment.eligible { "+" } else { "-" };
            println!("  {marker} {}", scheme.name);
            for outcome in &assessment.outcomes {
                let verdict = if outcome.satisfied { "pass" } else { "fail" };
                println!("      {} = {} -> {verdict}", outcome.name, outcome.value);
            }
        }

        if let Some(scheme) = available.first() {
            let application = services.applications.create(NewApplication {
                applicant_id: applicant.id,
                scheme_id: scheme.id,
            })?;
            println!("  Applied to {} (application {})", scheme.name, application.id);
        }
    }

    Ok(())
}
