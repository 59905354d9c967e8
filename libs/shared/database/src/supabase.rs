use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::{Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient};

use crate::store::{ClinicStore, StoreError, StoreResult};

const TIMESTAMP_FILTER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self) -> StoreResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.anon_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.anon_key))?,
        );

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("PostgREST error ({}): {}", status, error_text);
            return Err(StoreError::Backend(format!("API error ({}): {}", status, error_text)));
        }

        Ok(response.json::<T>().await?)
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

/// Row shape of the `appointments` table; timestamps travel as ISO-8601.
#[derive(Debug, Deserialize)]
struct AppointmentRow {
    id: i64,
    doctor_id: Option<i64>,
    patient_id: Option<i64>,
    #[serde(deserialize_with = "deserialize_row_timestamp")]
    appointment_datetime: NaiveDateTime,
    appointment_type: Option<String>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            doctor_id: row.doctor_id,
            patient_id: row.patient_id,
            appointment_datetime: row.appointment_datetime,
            appointment_type: row.appointment_type,
        }
    }
}

/// Reads `timestamp` and `timestamptz` columns alike. Offsets are folded
/// into UTC.
fn parse_row_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(with_offset) => Ok(with_offset.naive_utc()),
        Err(_) => NaiveDateTime::parse_from_str(raw, ROW_TIMESTAMP_FORMAT),
    }
}

fn deserialize_row_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_row_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn representation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Prefer", HeaderValue::from_static("return=representation"));
    headers
}

fn timestamp_filter(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FILTER_FORMAT).to_string()
}

fn first_row<T>(rows: Vec<T>, table: &str) -> StoreResult<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| StoreError::Backend(format!("insert into {} returned no rows", table)))
}

/// PostgREST-backed store. Foreign keys are expected to be declared with
/// `ON DELETE CASCADE` so doctor/patient deletes cascade server-side.
/// `appointment_datetime` may be `timestamp` or `timestamptz`; filters are
/// sent without an offset, so a `timestamptz` column assumes a UTC session.
///
/// The capacity check in `insert_appointment_within_capacity` is a count
/// followed by an insert over two requests; it is not atomic.
pub struct SupabaseStore {
    supabase: SupabaseClient,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn delete_returning(&self, path: &str) -> StoreResult<bool> {
        let deleted: Vec<Value> = self
            .supabase
            .request_with_headers(Method::DELETE, path, None, Some(representation_headers()))
            .await?;
        Ok(!deleted.is_empty())
    }
}

#[async_trait]
impl ClinicStore for SupabaseStore {
    async fn insert_doctor(&self, doctor: NewDoctor) -> StoreResult<Doctor> {
        let rows: Vec<Doctor> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/doctors",
                Some(serde_json::to_value(&doctor)?),
                Some(representation_headers()),
            )
            .await?;
        first_row(rows, "doctors")
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        self.supabase
            .request(Method::GET, "/rest/v1/doctors?order=id.asc", None)
            .await
    }

    async fn get_doctor(&self, doctor_id: i64) -> StoreResult<Option<Doctor>> {
        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        let rows: Vec<Doctor> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_doctor(&self, doctor_id: i64) -> StoreResult<bool> {
        self.delete_returning(&format!("/rest/v1/doctors?id=eq.{}", doctor_id))
            .await
    }

    async fn insert_patient(&self, patient: NewPatient) -> StoreResult<Patient> {
        let rows: Vec<Patient> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/patients",
                Some(serde_json::to_value(&patient)?),
                Some(representation_headers()),
            )
            .await?;
        first_row(rows, "patients")
    }

    async fn get_patient(&self, patient_id: i64) -> StoreResult<Option<Patient>> {
        let path = format!("/rest/v1/patients?id=eq.{}", patient_id);
        let rows: Vec<Patient> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_patient(&self, patient_id: i64) -> StoreResult<bool> {
        self.delete_returning(&format!("/rest/v1/patients?id=eq.{}", patient_id))
            .await
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let appointment_data = json!({
            "doctor_id": appointment.doctor_id,
            "patient_id": appointment.patient_id,
            "appointment_datetime": timestamp_filter(appointment.appointment_datetime),
            "appointment_type": appointment.appointment_type,
        });

        let rows: Vec<AppointmentRow> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(appointment_data),
                Some(representation_headers()),
            )
            .await?;
        first_row(rows, "appointments").map(Appointment::from)
    }

    async fn insert_appointment_within_capacity(
        &self,
        appointment: NewAppointment,
        capacity: usize,
    ) -> StoreResult<Option<Appointment>> {
        if let Some(doctor_id) = appointment.doctor_id {
            let existing = self
                .count_appointments(doctor_id, appointment.appointment_datetime)
                .await?;
            if existing >= capacity {
                warn!(
                    "Slot for doctor {} at {} already holds {} appointments",
                    doctor_id, appointment.appointment_datetime, existing
                );
                return Ok(None);
            }
        }

        self.insert_appointment(appointment).await.map(Some)
    }

    async fn get_appointment(&self, appointment_id: i64) -> StoreResult<Option<Appointment>> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let rows: Vec<AppointmentRow> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next().map(Appointment::from))
    }

    async fn find_appointments(
        &self,
        doctor_id: i64,
        at: NaiveDateTime,
    ) -> StoreResult<Vec<Appointment>> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&appointment_datetime=eq.{}&order=id.asc",
            doctor_id,
            timestamp_filter(at)
        );
        let rows: Vec<AppointmentRow> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn count_appointments(&self, doctor_id: i64, at: NaiveDateTime) -> StoreResult<usize> {
        let path = format!(
            "/rest/v1/appointments?select=id&doctor_id=eq.{}&appointment_datetime=eq.{}",
            doctor_id,
            timestamp_filter(at)
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.len())
    }

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>> {
        let rows: Vec<AppointmentRow> = self
            .supabase
            .request(Method::GET, "/rest/v1/appointments?order=id.asc", None)
            .await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn delete_appointment(&self, appointment_id: i64) -> StoreResult<bool> {
        self.delete_returning(&format!("/rest/v1/appointments?id=eq.{}", appointment_id))
            .await
    }
}
