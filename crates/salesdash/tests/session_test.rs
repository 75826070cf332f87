//! End-to-end runs of the dashboard session

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use salesdash::{Dashboard, DashboardOutcome, DashboardSession, DashboardView, FilterControls};
use salesdash::ConfigOverrides;
use salesdash_common::test_utils::{create_temp_dir, csv_fixtures, init_test_logging};
use salesdash_common::ChartKind;
use salesdash_config::Config;
use std::path::PathBuf;

fn session() -> DashboardSession {
    init_test_logging();
    DashboardSession::new(Config::default()).unwrap()
}

fn ready(outcome: DashboardOutcome) -> DashboardView {
    match outcome {
        DashboardOutcome::Ready(view) => *view,
        DashboardOutcome::Failed { message } => panic!("unexpected failure: {message}"),
    }
}

fn card_values(view: &DashboardView) -> Vec<String> {
    view.cards.iter().map(|c| c.value.clone()).collect()
}

#[test]
fn test_three_month_example() {
    let mut session = session();
    let view = ready(session.run(
        csv_fixtures::THREE_MONTHS.as_bytes(),
        &FilterControls::default(),
    ));

    assert_eq!(view.banner, "3 registros carregados com sucesso!");
    assert_eq!(view.record_count, 3);
    assert_eq!(view.report.monthly.len(), 3);
    assert_eq!(card_values(&view), vec!["R$ 325,00", "R$ 108,33", "-25,00%"]);
    assert_eq!(view.preview.rows.len(), 3);
    assert!(view.empty_notice.is_none());

    let kinds: Vec<ChartKind> = view.charts.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, ChartKind::ALL.to_vec());
}

#[test]
fn test_product_filter_narrows_metrics_and_preview() {
    let mut session = session();
    let controls = FilterControls::new(vec!["Camiseta".into()], None, None);
    let view = ready(session.run(csv_fixtures::MULTI_PRODUCT.as_bytes(), &controls));

    // The banner counts the whole upload, the preview only the selection
    assert_eq!(view.record_count, 6);
    assert_eq!(view.preview.rows.len(), 3);
    assert!(view.preview.rows.iter().all(|row| row[1] == "Camiseta"));
    assert_eq!(view.cards.total.value, "R$ 300,00");
    assert_eq!(view.cards.growth.value, "20,00%");
}

#[test]
fn test_date_range_filter() {
    let mut session = session();
    let controls = FilterControls::new(
        Vec::new(),
        NaiveDate::from_ymd_opt(2024, 2, 1),
        NaiveDate::from_ymd_opt(2024, 3, 31),
    );
    let view = ready(session.run(csv_fixtures::MULTI_PRODUCT.as_bytes(), &controls));

    assert_eq!(view.cards.total.value, "R$ 260,00");
    assert_eq!(view.report.monthly.len(), 2);
}

#[test]
fn test_empty_selection_degrades_instead_of_failing() {
    let mut session = session();
    let controls = FilterControls {
        products: Some(Vec::new()),
        ..FilterControls::default()
    };
    let view = ready(session.run(csv_fixtures::MULTI_PRODUCT.as_bytes(), &controls));

    assert_eq!(
        view.empty_notice.as_deref(),
        Some("Nenhum registro corresponde aos filtros selecionados.")
    );
    assert!(view.report.is_empty());
    assert!(view.preview.rows.is_empty());
    assert_eq!(view.cards.total.value, "R$ 0,00");
    assert_eq!(view.cards.average.value, "n/d");
    assert_eq!(view.charts.len(), 3);
}

#[test]
fn test_zero_first_month_has_no_overall_growth() {
    let mut session = session();
    let view = ready(session.run(
        csv_fixtures::ZERO_THEN_SALES.as_bytes(),
        &FilterControls::default(),
    ));

    assert_eq!(view.cards.growth.value, "n/d");
}

#[test]
fn test_header_only_upload() {
    let mut session = session();
    let view = ready(session.run(csv_fixtures::HEADER_ONLY.as_bytes(), &FilterControls::default()));

    assert_eq!(view.banner, "0 registros carregados com sucesso!");
    assert!(view.report.is_empty());
}

#[test]
fn test_missing_column_becomes_message() {
    let mut session = session();
    let outcome = session.run(
        csv_fixtures::MISSING_PRODUCT.as_bytes(),
        &FilterControls::default(),
    );

    let DashboardOutcome::Failed { message } = outcome else {
        panic!("missing column must fail");
    };
    assert!(message.starts_with("Erro ao processar o arquivo: "));
    assert!(message.contains("Produto"));
}

#[test]
fn test_repeated_selection_hits_report_cache() {
    let mut session = session();
    let controls = FilterControls::default();
    let bytes = csv_fixtures::MULTI_PRODUCT.as_bytes();

    let first = ready(session.run(bytes, &controls));
    let second = ready(session.run(bytes, &controls));

    assert_eq!(first.report, second.report);
    assert_eq!(session.report_stats().hits, 1);
    assert_eq!(session.dataset_stats().hits, 1);
}

#[test]
fn test_english_locale() {
    init_test_logging();
    let config = Config::from_yaml("data:\n  locale: en-US\n").unwrap();
    let mut session = DashboardSession::new(config).unwrap();
    let view = ready(session.run(
        csv_fixtures::THREE_MONTHS.as_bytes(),
        &FilterControls::default(),
    ));

    assert_eq!(view.banner, "3 records loaded successfully!");
    assert_eq!(card_values(&view), vec!["R$ 325.00", "R$ 108.33", "-25.00%"]);
}

fn dashboard(dir: &std::path::Path, config_path: Option<PathBuf>) -> Dashboard {
    let input = dir.join("vendas.csv");
    std::fs::write(&input, csv_fixtures::THREE_MONTHS).unwrap();
    let mut config = Config::default();
    config.output.directory = dir.join("graficos");
    Dashboard::new(
        config,
        input,
        config_path,
        FilterControls::default(),
        ConfigOverrides::default(),
    )
    .unwrap()
}

#[test]
fn test_dashboard_prints_view_and_writes_pngs() {
    init_test_logging();
    let temp = create_temp_dir();
    let mut dashboard = dashboard(temp.path(), None);

    let mut out = Vec::new();
    assert!(dashboard.run_once(&mut out).unwrap());
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("3 registros carregados com sucesso!"));
    assert!(text.contains("Prévia dos dados"));
    assert!(text.contains("💰 Total Vendido: R$ 325,00"));
    assert!(text.contains("Gráfico salvo em"));

    let expected = [
        ("grafico_vendas_mensais.png", (1200, 500)),
        ("grafico_crescimento_percentual.png", (1200, 500)),
        ("grafico_combinado.png", (1200, 600)),
    ];
    for (name, size) in expected {
        let png = std::fs::read(temp.path().join("graficos").join(name)).unwrap();
        let image = image::load_from_memory(&png).unwrap();
        assert_eq!((image.width(), image.height()), size, "{name}");
    }
}

#[test]
fn test_dashboard_reloads_configuration() {
    init_test_logging();
    let temp = create_temp_dir();
    let config_path = temp.path().join("salesdash.yaml");
    std::fs::write(&config_path, "data:\n  locale: en-US\n").unwrap();
    let mut dashboard = dashboard(temp.path(), Some(config_path.clone()));

    let mut out = Vec::new();
    assert!(dashboard.reload_config(&mut out).unwrap());
    assert_eq!(String::from_utf8(out).unwrap(), "Configuration reloaded\n");
    assert_eq!(dashboard.config().data.locale, "en-US");

    std::fs::write(&config_path, "data:\n  locale: xx-YY\n").unwrap();
    let mut out = Vec::new();
    assert!(!dashboard.reload_config(&mut out).unwrap());
    assert!(String::from_utf8(out).unwrap().starts_with("Error while processing the file: "));
    assert_eq!(dashboard.config().data.locale, "en-US");
}
