//! In-memory programmes API used by the controller tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use pushkind_planning::api::errors::{ApiError, ApiResult};
use pushkind_planning::domain::programme::{NewProgramme, Programme, ProgrammeStatus};
use pushkind_planning::domain::types::{ProgrammeCode, ProgrammeId, ProgrammeName};
use pushkind_planning::gateway::{ListGateway, MutationGateway, Programmes};
use pushkind_planning::list::query::ListQuery;
use pushkind_planning::pagination::{ListPage, PaginationEnvelope};

pub fn programme(id: i32, name: &str, status: ProgrammeStatus) -> Programme {
    Programme {
        id: ProgrammeId::new(id).unwrap(),
        code: format!("P{id}"),
        name: name.to_string(),
        status,
        date_debut: None,
        date_fin: None,
        description: None,
    }
}

pub fn new_programme(name: &str, status: ProgrammeStatus) -> NewProgramme {
    NewProgramme {
        code: ProgrammeCode::new(name.to_uppercase()).unwrap(),
        name: ProgrammeName::new(name).unwrap(),
        status,
        date_debut: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        date_fin: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        description: None,
    }
}

/// Programmes backend with scripted latency and failures.
#[derive(Default)]
pub struct FakeProgrammesApi {
    rows: Mutex<Vec<Programme>>,
    calls: Mutex<Vec<ListQuery>>,
    delays: Mutex<HashMap<String, Duration>>,
    conflicts: Mutex<HashSet<i32>>,
    completed: AtomicUsize,
    next_id: AtomicI32,
    fail_lists: AtomicBool,
    fail_mutations: AtomicBool,
}

impl FakeProgrammesApi {
    pub fn with_rows(rows: Vec<Programme>) -> Self {
        let next_id = rows.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(rows),
            next_id: AtomicI32::new(next_id),
            ..Self::default()
        }
    }

    /// `count` programmes named `Programme <id>`, every third one in progress.
    pub fn with_generated(count: i32) -> Self {
        let rows = (1..=count)
            .map(|id| {
                let status = if id % 3 == 0 {
                    ProgrammeStatus::EnCours
                } else {
                    ProgrammeStatus::Planifie
                };
                programme(id, &format!("Programme {id}"), status)
            })
            .collect();
        Self::with_rows(rows)
    }

    /// Delays list responses for queries searching `term`.
    pub fn delay_search(&self, term: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(term.to_string(), delay);
    }

    pub fn block_delete(&self, id: i32) {
        self.conflicts.lock().unwrap().insert(id);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Queries received, in call order.
    pub fn calls(&self) -> Vec<ListQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// List requests that ran to completion instead of being dropped.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    fn check_mutation(&self) -> ApiResult<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ListGateway<Programmes> for FakeProgrammesApi {
    async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Programme>> {
        self.calls.lock().unwrap().push(query.clone());

        let search = query.get("search").unwrap_or_default().to_lowercase();
        let delay = self.delays.lock().unwrap().get(&search).copied();
        tokio::time::sleep(delay.unwrap_or(Duration::from_millis(20))).await;
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".into()));
        }

        let matching = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&search))
            .filter(|p| query.get("status").is_none_or(|status| p.status.as_str() == status))
            .cloned()
            .collect::<Vec<_>>();

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip((query.page - 1) * query.limit)
            .take(query.limit)
            .collect();
        Ok(ListPage::new(
            items,
            PaginationEnvelope::new(query.page, query.limit, total),
        ))
    }
}

#[async_trait]
impl MutationGateway<Programmes> for FakeProgrammesApi {
    async fn create(&self, payload: &NewProgramme) -> ApiResult<Programme> {
        self.check_mutation()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Programme {
            id: ProgrammeId::new(id).unwrap(),
            code: payload.code.to_string(),
            name: payload.name.to_string(),
            status: payload.status,
            date_debut: Some(payload.date_debut),
            date_fin: Some(payload.date_fin),
            description: payload.description.clone(),
        };
        self.rows.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn update(&self, id: ProgrammeId, payload: &NewProgramme) -> ApiResult<Programme> {
        self.check_mutation()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ApiError::NotFound)?;
        row.code = payload.code.to_string();
        row.name = payload.name.to_string();
        row.status = payload.status;
        Ok(row.clone())
    }

    async fn delete(&self, id: ProgrammeId, force: bool) -> ApiResult<()> {
        self.check_mutation()?;
        if !force && self.conflicts.lock().unwrap().contains(&id.get()) {
            return Err(ApiError::Conflict {
                message: "Ce programme a des modules planifiés.".into(),
                counts: BTreeMap::from([("modules".to_string(), 2)]),
            });
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
