//! In-memory PokeAPI for tests: canned JSON per URL, simulated latency and
//! bookkeeping of how many requests were in flight at once.

use super::{PokeApiTransport, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const BASE_URL: &str = "https://pokeapi.test/api/v2";

pub fn detail_url(id: u32) -> String {
    format!("{}/pokemon/{}/", BASE_URL, id)
}

pub fn species_url(id: u32) -> String {
    format!("{}/pokemon-species/{}/", BASE_URL, id)
}

pub fn index_url(offset: u32, limit: u32) -> String {
    format!("{}/pokemon?offset={}&limit={}", BASE_URL, offset, limit)
}

/// `GET /pokemon?offset&limit` body; entries are `(id, name)`
pub fn index_json(count: u32, has_next: bool, entries: &[(u32, &str)]) -> Value {
    let results: Vec<Value> = entries
        .iter()
        .map(|(id, name)| json!({"name": name, "url": detail_url(*id)}))
        .collect();
    let next = if has_next {
        Value::from(format!("{}/pokemon?more", BASE_URL))
    } else {
        Value::Null
    };
    json!({
        "count": count,
        "next": next,
        "previous": Value::Null,
        "results": results,
    })
}

pub fn pokemon_json(id: u32, name: &str, types: &[&str]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": ""}}))
        .collect();
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "sprites": {"front_default": format!("https://img.test/{}.png", id)},
        "types": types,
        "abilities": [],
        "moves": [],
        "stats": [],
        "species": {"name": name, "url": species_url(id)},
    })
}

/// Species body; `names` are `(language, display name)`
pub fn species_json(id: u32, names: &[(&str, &str)]) -> Value {
    let names: Vec<Value> = names
        .iter()
        .map(|(lang, name)| json!({"name": name, "language": {"name": lang, "url": ""}}))
        .collect();
    json!({
        "id": id,
        "names": names,
        "evolution_chain": {"url": format!("{}/evolution-chain/{}/", BASE_URL, id)},
    })
}

pub struct StubTransport {
    routes: Mutex<HashMap<String, Result<Value, TransportError>>>,
    delays: Mutex<HashMap<String, VecDeque<Duration>>>,
    latency: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            latency,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn ok(&self, url: impl Into<String>, body: Value) {
        self.routes.lock().unwrap().insert(url.into(), Ok(body));
    }

    pub fn fail(&self, url: impl Into<String>, error: TransportError) {
        self.routes.lock().unwrap().insert(url.into(), Err(error));
    }

    /// Delay the next call to `url` by `delay` instead of the default latency
    pub fn delay_next(&self, url: impl Into<String>, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .entry(url.into())
            .or_default()
            .push_back(delay);
    }

    /// Register a pokemon with its detail and (optionally) species bodies
    pub fn pokemon(&self, id: u32, name: &str, types: &[&str], names: Option<&[(&str, &str)]>) {
        self.ok(detail_url(id), pokemon_json(id, name, types));
        if let Some(names) = names {
            self.ok(species_url(id), species_json(id, names));
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == url).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PokeApiTransport for StubTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(self.latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(TransportError::Status {
                    status: 404,
                    url: url.to_string(),
                })
            })
    }
}
