use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::Classifier;
use crate::error::ServiceError;
use crate::hub::{AlertEvent, AlertHub};
use crate::models::alert::{Alert, DEFAULT_ALERT_RADIUS_M};
use crate::models::barrier::Barrier;
use crate::models::location::Location;
use crate::models::report::{AlertReport, BarrierReport, Envelope, LocationReport, RouteRequest};
use crate::routing::RouteEngine;
use crate::store::{AlertStore, BarrierStore, LocationStore};

/// Processes one inbound command per call. Creation is all-or-nothing: each
/// record is built fully in memory and persisted once; broadcasts happen only
/// after the persist succeeded.
pub struct ReportProcessor {
    locations: Arc<dyn LocationStore>,
    barriers: Arc<dyn BarrierStore>,
    alerts: Arc<dyn AlertStore>,
    engine: RouteEngine,
    hub: Arc<AlertHub>,
    classifier: Option<Arc<dyn Classifier>>,
}

impl ReportProcessor {
    pub fn new(
        locations: Arc<dyn LocationStore>,
        barriers: Arc<dyn BarrierStore>,
        alerts: Arc<dyn AlertStore>,
        engine: RouteEngine,
        hub: Arc<AlertHub>,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Self {
        Self {
            locations,
            barriers,
            alerts,
            engine,
            hub,
            classifier,
        }
    }

    pub async fn process(&self, payload: &[u8]) -> anyhow::Result<()> {
        // Malformed payloads are logged and skipped; the topic keeps moving.
        let envelope: Envelope = match serde_json::from_slice(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Failed to parse inbound message: {}", e);
                return Ok(());
            }
        };

        match envelope {
            Envelope::Location(report) => self.handle_location(report).await,
            Envelope::BarrierReport(report) => self.handle_barrier(report).await,
            Envelope::Alert(report) => self.handle_alert(report).await,
            Envelope::RouteRequest(request) => self.handle_route(request).await,
        }
    }

    async fn handle_location(&self, report: LocationReport) -> anyhow::Result<()> {
        let (latitude, longitude) = match (report.latitude, report.longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                warn!("Location report missing coordinates, skipping");
                return Ok(());
            }
        };
        if report.sanchara_score.is_some() {
            // Clients cannot assert their own score.
            warn!("Discarding client-supplied sanchara score for '{}'", report.name);
        }

        let location = Location::from_report(report, latitude, longitude);
        let location = self.locations.create(location).await?;
        info!(
            "Registered location {} '{}' with score {:.1}",
            location.id, location.name, location.sanchara_score
        );
        Ok(())
    }

    async fn handle_barrier(&self, report: BarrierReport) -> anyhow::Result<()> {
        let (latitude, longitude) = match (report.latitude, report.longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                warn!("Barrier report missing coordinates, skipping");
                return Ok(());
            }
        };

        // Classification is best-effort: a classifier failure is logged and
        // the barrier is stored without a label.
        let ai_classification = match (&report.photo_base64, &self.classifier) {
            (Some(photo), Some(classifier)) => match classifier.classify(photo).await {
                Ok(label) => Some(label),
                Err(e) => {
                    warn!("Photo classification failed: {}", e);
                    None
                }
            },
            _ => None,
        };

        let barrier = Barrier {
            id: Uuid::new_v4(),
            user_id: report.user_id,
            latitude,
            longitude,
            barrier_type: report.barrier_type,
            severity: report.severity,
            description: report.description,
            photo_base64: report.photo_base64,
            ai_classification,
            verified: false,
            created_at: Utc::now().naive_utc(),
        };

        let barrier = self.barriers.create(barrier).await?;
        info!(
            "Recorded {} barrier {} (severity {})",
            barrier.barrier_type, barrier.id, barrier.severity
        );

        // Only high-severity reports turn into a live event.
        if barrier.severity == "high" {
            self.hub.broadcast(AlertEvent::from_barrier(&barrier)).await;
        }
        Ok(())
    }

    async fn handle_alert(&self, report: AlertReport) -> anyhow::Result<()> {
        let (latitude, longitude) = match (report.latitude, report.longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                warn!("Alert missing coordinates, skipping");
                return Ok(());
            }
        };

        let alert = Alert {
            id: Uuid::new_v4(),
            latitude,
            longitude,
            alert_type: report.alert_type,
            message: report.message,
            severity: report.severity,
            radius: report.radius.unwrap_or(DEFAULT_ALERT_RADIUS_M),
            created_at: Utc::now().naive_utc(),
            expires_at: None,
        };

        let alert = self.alerts.create(alert).await?;
        info!("Created {} alert {}", alert.alert_type, alert.id);

        // Explicit alerts always fan out.
        self.hub.broadcast(AlertEvent::from_alert(&alert)).await;
        Ok(())
    }

    async fn handle_route(&self, request: RouteRequest) -> anyhow::Result<()> {
        match self.engine.plan_route(&request).await {
            Ok(route) => {
                info!(
                    "Planned route {} for user {}: {:.0} m, score {:.1}",
                    route.id, route.user_id, route.distance, route.accessibility_score
                );
                Ok(())
            }
            // Bad requests are the publisher's problem, not a pipeline fault.
            Err(ServiceError::InvalidRequest(msg)) => {
                warn!("Rejected route request for user {}: {}", request.user_id, msg);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
