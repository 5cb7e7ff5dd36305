//! Programme import from an uploaded workbook.
//!
//! The workbook is parsed locally: each sheet arrives as CSV text, required
//! fields are checked row by row, and the result is a normalized JSON payload
//! the API creates the programme and its modules from.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::programme::ProgrammeStatus;
use crate::domain::types::{Email, ModuleCode, ModuleName, ProgrammeCode, ProgrammeName};
use crate::forms::FormError;

pub const PROGRAMME_SHEET: &str = "Programme";
pub const MODULES_SHEET: &str = "Modules";

/// One problem found in the workbook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportIssue {
    pub sheet: String,
    /// 1-based spreadsheet row, header included; `None` for sheet-level issues.
    pub row: Option<usize>,
    pub field: Option<String>,
    pub message: String,
}

impl ImportIssue {
    fn sheet(sheet: &str, message: impl Into<String>) -> Self {
        Self {
            sheet: sheet.to_string(),
            row: None,
            field: None,
            message: message.into(),
        }
    }

    fn cell(sheet: &str, row: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            sheet: sheet.to_string(),
            row: Some(row),
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Key used when issues are shown through [`super::FieldErrors`].
    pub fn field_key(&self) -> String {
        match (self.row, &self.field) {
            (Some(row), Some(field)) => format!("{}[{row}].{field}", self.sheet),
            (Some(row), None) => format!("{}[{row}]", self.sheet),
            _ => self.sheet.clone(),
        }
    }
}

impl Display for ImportIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "{} ligne {row} : {}", self.sheet, self.message),
            None => write!(f, "{} : {}", self.sheet, self.message),
        }
    }
}

/// Uploaded workbook as named CSV sheets.
#[derive(Clone, Debug, Default)]
pub struct Workbook {
    sheets: BTreeMap<String, String>,
}

impl Workbook {
    pub fn from_sheets<N, C>(sheets: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            sheets: sheets
                .into_iter()
                .map(|(name, content)| (name.into(), content.into()))
                .collect(),
        }
    }

    /// Reads every `*.csv` file of `dir`, naming each sheet after its file stem.
    pub fn from_dir(dir: &Path) -> std::io::Result<Self> {
        let mut sheets = BTreeMap::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            sheets.insert(name.to_string(), std::fs::read_to_string(&path)?);
        }
        Ok(Self { sheets })
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// Sheet lookup ignoring case, as spreadsheet tools do.
    pub fn sheet(&self, name: &str) -> Option<&str> {
        self.sheets
            .iter()
            .find(|(sheet, _)| sheet.eq_ignore_ascii_case(name))
            .map(|(_, content)| content.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ProgrammeRow {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    date_debut: String,
    #[serde(default)]
    date_fin: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ModuleRow {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    hours_planned: String,
    #[serde(default)]
    intervenant_email: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ImportedProgramme {
    pub code: ProgrammeCode,
    pub name: ProgrammeName,
    pub status: ProgrammeStatus,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ImportedModule {
    pub code: ModuleCode,
    pub name: ModuleName,
    pub hours_planned: u32,
    /// Matched against existing intervenants by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervenant_email: Option<Email>,
}

/// Body of `POST /programmes/import`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProgrammeImportPayload {
    pub programme: ImportedProgramme,
    pub modules: Vec<ImportedModule>,
}

impl TryFrom<&Workbook> for ProgrammeImportPayload {
    type Error = FormError;

    fn try_from(workbook: &Workbook) -> Result<Self, Self::Error> {
        let mut issues = Vec::new();

        let programme = match workbook.sheet(PROGRAMME_SHEET) {
            Some(content) => parse_programme(content, &mut issues),
            None => {
                issues.push(ImportIssue::sheet(PROGRAMME_SHEET, "Feuille manquante"));
                None
            }
        };
        let modules = match workbook.sheet(MODULES_SHEET) {
            Some(content) => parse_modules(content, &mut issues),
            None => {
                issues.push(ImportIssue::sheet(MODULES_SHEET, "Feuille manquante"));
                Vec::new()
            }
        };

        match programme {
            Some(programme) if issues.is_empty() => Ok(Self { programme, modules }),
            _ => {
                log::warn!("Programme import rejected with {} issue(s)", issues.len());
                Err(FormError::Import(issues))
            }
        }
    }
}

/// Data rows with their 1-based spreadsheet row number.
fn rows<T: for<'de> Deserialize<'de>>(
    sheet: &str,
    content: &str,
    issues: &mut Vec<ImportIssue>,
) -> Vec<(usize, T)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<T>().enumerate() {
        let row = index + 2;
        match record {
            Ok(record) => rows.push((row, record)),
            Err(err) => issues.push(ImportIssue {
                sheet: sheet.to_string(),
                row: Some(row),
                field: None,
                message: format!("Ligne illisible : {err}"),
            }),
        }
    }
    rows
}

fn required<T, E>(
    issues: &mut Vec<ImportIssue>,
    sheet: &str,
    row: usize,
    field: &str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(_) => {
            issues.push(ImportIssue::cell(sheet, row, field, "Champ obligatoire"));
            None
        }
    }
}

fn date(
    issues: &mut Vec<ImportIssue>,
    row: usize,
    field: &str,
    value: &str,
) -> Option<NaiveDate> {
    if value.is_empty() {
        issues.push(ImportIssue::cell(PROGRAMME_SHEET, row, field, "Champ obligatoire"));
        return None;
    }
    // Spreadsheet tools export either ISO or French day-first dates.
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"));
    match parsed {
        Ok(date) => Some(date),
        Err(_) => {
            issues.push(ImportIssue::cell(
                PROGRAMME_SHEET,
                row,
                field,
                format!("Date invalide `{value}`"),
            ));
            None
        }
    }
}

fn parse_programme(content: &str, issues: &mut Vec<ImportIssue>) -> Option<ImportedProgramme> {
    let mut rows = rows::<ProgrammeRow>(PROGRAMME_SHEET, content, issues).into_iter();
    let Some((row, record)) = rows.next() else {
        issues.push(ImportIssue::sheet(PROGRAMME_SHEET, "Aucune ligne de programme"));
        return None;
    };
    if rows.next().is_some() {
        issues.push(ImportIssue::sheet(
            PROGRAMME_SHEET,
            "Une seule ligne de programme est attendue",
        ));
    }

    let sheet = PROGRAMME_SHEET;
    let code = required(issues, sheet, row, "code", ProgrammeCode::new(record.code));
    let name = required(issues, sheet, row, "name", ProgrammeName::new(record.name));
    let status = if record.status.is_empty() {
        Some(ProgrammeStatus::Planifie)
    } else {
        match ProgrammeStatus::try_from(record.status.as_str()) {
            Ok(status) => Some(status),
            Err(_) => {
                issues.push(ImportIssue::cell(
                    sheet,
                    row,
                    "status",
                    format!("Statut inconnu `{}`", record.status),
                ));
                None
            }
        }
    };
    let date_debut = date(issues, row, "date_debut", &record.date_debut);
    let date_fin = date(issues, row, "date_fin", &record.date_fin);
    if let (Some(start), Some(end)) = (date_debut, date_fin) {
        if end < start {
            issues.push(ImportIssue::cell(
                sheet,
                row,
                "date_fin",
                "La date de fin doit suivre la date de début",
            ));
        }
    }

    Some(ImportedProgramme {
        code: code?,
        name: name?,
        status: status?,
        date_debut: date_debut?,
        date_fin: date_fin?,
        description: Some(record.description).filter(|text| !text.is_empty()),
    })
}

fn parse_modules(content: &str, issues: &mut Vec<ImportIssue>) -> Vec<ImportedModule> {
    let sheet = MODULES_SHEET;
    let rows = rows::<ModuleRow>(sheet, content, issues);
    if rows.is_empty() {
        issues.push(ImportIssue::sheet(sheet, "Aucun module"));
    }

    let mut modules = Vec::with_capacity(rows.len());
    for (row, record) in rows {
        let code = required(issues, sheet, row, "code", ModuleCode::new(record.code));
        let name = required(issues, sheet, row, "name", ModuleName::new(record.name));
        let hours_planned = match record.hours_planned.parse::<u32>() {
            Ok(hours) if (1..=500).contains(&hours) => Some(hours),
            _ if record.hours_planned.is_empty() => {
                issues.push(ImportIssue::cell(sheet, row, "hours_planned", "Champ obligatoire"));
                None
            }
            _ => {
                issues.push(ImportIssue::cell(
                    sheet,
                    row,
                    "hours_planned",
                    "Volume horaire entre 1 et 500 attendu",
                ));
                None
            }
        };
        let intervenant_email = if record.intervenant_email.is_empty() {
            Some(None)
        } else {
            match Email::new(record.intervenant_email) {
                Ok(email) => Some(Some(email)),
                Err(_) => {
                    issues.push(ImportIssue::cell(
                        sheet,
                        row,
                        "intervenant_email",
                        "Adresse e-mail invalide",
                    ));
                    None
                }
            }
        };

        if let (Some(code), Some(name), Some(hours_planned), Some(intervenant_email)) =
            (code, name, hours_planned, intervenant_email)
        {
            modules.push(ImportedModule {
                code,
                name,
                hours_planned,
                intervenant_email,
            });
        }
    }
    modules
}
