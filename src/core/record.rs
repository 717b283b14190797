use serde::{Deserialize, Serialize};

/// Experience levels in legend order.
pub const EXPERIENCE_LEVELS: [&str; 4] = ["EN", "MI", "SE", "EX"];

/// Company sizes in legend order.
pub const COMPANY_SIZES: [&str; 3] = ["S", "M", "L"];

/// One job-salary observation after numeric coercion.
///
/// `salary_in_usd` is always finite and `experience_level` non-empty for
/// records produced by the loader. Other numeric fields may be missing:
/// `work_year` is `None` and `remote_ratio` is NaN when the source cell did not
/// parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub salary_in_usd: f64,
    pub work_year: Option<i32>,
    pub experience_level: String,
    pub company_size: String,
    pub company_location: String,
    pub employee_residence: String,
    pub remote_ratio: f64,
}

impl Record {
    #[must_use]
    pub fn new(
        salary_in_usd: f64,
        work_year: i32,
        experience_level: impl Into<String>,
        company_size: impl Into<String>,
    ) -> Self {
        Self {
            salary_in_usd,
            work_year: Some(work_year),
            experience_level: experience_level.into(),
            company_size: company_size.into(),
            company_location: String::new(),
            employee_residence: String::new(),
            remote_ratio: 0.0,
        }
    }

    #[must_use]
    pub fn with_location(
        mut self,
        company_location: impl Into<String>,
        employee_residence: impl Into<String>,
    ) -> Self {
        self.company_location = company_location.into();
        self.employee_residence = employee_residence.into();
        self
    }

    #[must_use]
    pub fn with_remote_ratio(mut self, remote_ratio: f64) -> Self {
        self.remote_ratio = remote_ratio;
        self
    }

    #[must_use]
    pub fn numeric(&self, field: RecordField) -> Option<f64> {
        match field {
            RecordField::SalaryInUsd => Some(self.salary_in_usd),
            RecordField::WorkYear => self.work_year.map(f64::from),
            RecordField::RemoteRatio => Some(self.remote_ratio),
            _ => None,
        }
    }

    /// Text value of `field`; numeric fields are rendered with `Display`.
    #[must_use]
    pub fn category(&self, field: RecordField) -> String {
        match field {
            RecordField::ExperienceLevel => self.experience_level.clone(),
            RecordField::CompanySize => self.company_size.clone(),
            RecordField::CompanyLocation => self.company_location.clone(),
            RecordField::EmployeeResidence => self.employee_residence.clone(),
            RecordField::SalaryInUsd => self.salary_in_usd.to_string(),
            RecordField::RemoteRatio => self.remote_ratio.to_string(),
            RecordField::WorkYear => self
                .work_year
                .map_or_else(String::new, |year| year.to_string()),
        }
    }
}

/// Column selector used by parallel-coordinate dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    SalaryInUsd,
    WorkYear,
    ExperienceLevel,
    CompanySize,
    CompanyLocation,
    EmployeeResidence,
    RemoteRatio,
}

impl RecordField {
    /// CSV column name, also used as axis title.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::SalaryInUsd => "salary_in_usd",
            Self::WorkYear => "work_year",
            Self::ExperienceLevel => "experience_level",
            Self::CompanySize => "company_size",
            Self::CompanyLocation => "company_location",
            Self::EmployeeResidence => "employee_residence",
            Self::RemoteRatio => "remote_ratio",
        }
    }
}

/// Display name used by the line-chart legend.
#[must_use]
pub fn company_size_label(size: &str) -> &str {
    match size {
        "S" => "Small",
        "M" => "Medium",
        "L" => "Large",
        other => other,
    }
}
