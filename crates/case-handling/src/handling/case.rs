use serde::{Deserialize, Serialize};

/// Citizen request category, as tagged by upstream intent detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intention {
    ExpirationDUneApi,
    DepotDeDemandeDAsile,
    OuEnEstMaDemAsileEnCours,
    ExpirationDUneAtda,
    MiseAJourInfosAtda,
    DemEnRapportDublinEnCours,
    UkrDemandeUnNouveauTitre,
    UkrDemandeRenouvTitre,
    UkrAutreDemande,
    DemEtudiantProgrMobilite,
    DemStagiaireProfMedic,
    DiffAvecLeSiteDeLAnef,
    ChangStatEtudASalarie,
    ChangStatEtudARechEmpl,
    SollicitTitreVpfHorsAnef,
    DepotDemTitrePbCrCpteAnef,
    DepotDemTitreAutreBlocageAnef,
    DepotDemTitreAutrePbAnef,
    DemRetourPaysMotifExcept,
    #[serde(other)]
    Other,
}

/// Customer attributes collected alongside the request.
///
/// Dates stay as `d/M/yyyy` text; rule sets interpret them through the date calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerData {
    pub department: String,
    pub request_date: String,
    pub api_expiration_date: String,
    #[serde(default)]
    pub refugee_or_subsidiary_protection: bool,
    #[serde(default)]
    pub employment_risk: bool,
}

/// Incoming case submitted for routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub intention: Intention,
    pub customer_data: CustomerData,
}

impl Case {
    pub fn department(&self) -> &str {
        &self.customer_data.department
    }
}
