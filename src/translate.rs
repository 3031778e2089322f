//! Portuguese display names for service, status and severity values.
//!
//! The pass rewrites values in place; [`Record::original`] still returns
//! the value as exported.

use crate::record::{RecordSet, SERVICE, SERVICE_ASCII, SEVERITY, STATUS};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static SERVICE_PT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Oracle Fusion Cost Management Cloud Service", "Oracle Fusion Gestão de Custos – Serviço em Nuvem"),
        ("Oracle Integration 3", "Oracle Integration 3 – Integração"),
        ("Oracle Supply Planning Cloud Service", "Oracle Planejamento de Suprimentos – Serviço em Nuvem"),
        ("Oracle Fusion Expenses Cloud Service", "Oracle Fusion Despesas – Serviço em Nuvem"),
        ("Oracle Fusion Purchasing Cloud Service", "Oracle Fusion Compras – Serviço em Nuvem"),
        ("Oracle Fusion Project Costing Cloud Service", "Oracle Fusion Custos de Projetos – Serviço em Nuvem"),
        ("Oracle Fusion Inventory Management Cloud Service", "Oracle Fusion Gestão de Estoque – Serviço em Nuvem"),
        ("Oracle Fusion Performance Management Cloud Service", "Oracle Fusion Gestão de Performance (EPM) – Serviço em Nuvem"),
        ("Oracle Data Transforms", "Oracle Transformações de Dados (Data Transforms)"),
        ("Oracle Fusion Product Development Cloud Service", "Oracle Fusion Desenvolvimento de Produto – Serviço em Nuvem"),
        ("Oracle Enterprise Data Management Cloud Service", "Oracle Gestão de Dados Corporativos (EDM) – Serviço em Nuvem"),
        ("Oracle Fusion Tax Cloud Service", "Oracle Fusion Fiscal/Impostos – Serviço em Nuvem"),
        ("OCI Application Performance Monitoring Service", "OCI Monitoramento de Performance de Aplicações (APM)"),
        ("Oracle Fusion Order Management Cloud Service", "Oracle Fusion Gestão de Pedidos – Serviço em Nuvem"),
        ("Oracle Fusion Receivables Cloud Service", "Oracle Fusion Contas a Receber – Serviço em Nuvem"),
        ("Oracle Fusion Self Service Procurement Cloud Service", "Oracle Fusion Compras Self-Service – Serviço em Nuvem"),
        ("Latin America Cloud Local Solution (LACLS)", "Solução Local América Latina (LACLS)"),
        ("Oracle Fusion Assets Cloud Service", "Oracle Fusion Ativos (FA) – Serviço em Nuvem"),
        ("Autonomous Database Serverless", "Banco de Dados Autônomo (Serverless)"),
        ("Oracle Transportation Management Cloud Service", "Oracle Gestão de Transporte (OTM) – Serviço em Nuvem"),
        ("Oracle APEX in Cloud", "Oracle APEX na Nuvem"),
        ("Oracle Cloud Infrastructure - API Gateway", "OCI – API Gateway"),
        ("Oracle Fusion Global Human Resources Cloud Service", "Oracle Fusion Recursos Humanos Global (HCM) – Serviço em Nuvem"),
        ("Oracle Fusion Product Hub Cloud Service", "Oracle Fusion Central de Produtos (Product Hub) – Serviço em Nuvem"),
        ("Oracle Fusion Financials for the Americas", "Oracle Fusion Financeiro para as Américas"),
        ("Oracle Fusion Financials Common Module Cloud Service", "Oracle Fusion Financeiro – Módulo Comum – Serviço em Nuvem"),
        ("Oracle Fusion Procurement Contracts Cloud Service", "Oracle Fusion Contratos de Compras – Serviço em Nuvem"),
    ])
});

// keys are normalized with `norm_key`
static STATUS_PT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("review defect", "Revisão de Defeito"),
        ("review update", "Revisão de Atualização"),
        ("customer working", "Cliente em Ação"),
        ("development working", "Desenvolvimento em Ação"),
        ("work in progress", "Em Andamento"),
        ("solution offered", "Solução Oferecida"),
        ("close requested", "Fechamento Solicitado"),
        ("closed", "Fechado"),
        ("resolved", "Resolvido"),
    ])
});

static SEVERITY_PT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("1-critical", "1-Crítica"),
        ("2-significant", "2-Significativa"),
        ("3-standard", "3-Padrão"),
    ])
});

fn norm_key(v: &str) -> String {
    v.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

pub fn translate_service(value: &str) -> Option<&'static str> {
    SERVICE_PT.get(value).copied()
}

pub fn translate_status(value: &str) -> Option<&'static str> {
    STATUS_PT.get(norm_key(value).as_str()).copied()
}

pub fn translate_severity(value: &str) -> Option<&'static str> {
    SEVERITY_PT.get(norm_key(value).as_str()).copied()
}

/// Rewrites known service/status/severity values. Returns how many field
/// values changed.
pub fn translate_records(set: &mut RecordSet) -> usize {
    let rules: [(&str, fn(&str) -> Option<&'static str>); 4] = [
        (SERVICE, translate_service),
        (SERVICE_ASCII, translate_service),
        (STATUS, translate_status),
        (SEVERITY, translate_severity),
    ];
    let mut changed = 0;
    for record in set.records_mut() {
        for (field, lookup) in rules {
            let Some(pt) = record.get(field).and_then(lookup) else { continue };
            if record.set(field, pt) {
                changed += 1;
            }
        }
    }
    tracing::debug!(changed, "translated field values");
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lookup_ignores_case_and_spacing() {
        assert_eq!(translate_status("  Close   Requested "), Some("Fechamento Solicitado"));
        assert_eq!(translate_status("Unknown"), None);
    }

    #[test]
    fn service_lookup_is_exact() {
        assert_eq!(translate_service("Oracle APEX in Cloud"), Some("Oracle APEX na Nuvem"));
        assert_eq!(translate_service("oracle apex in cloud"), None);
    }
}
