use clap::Parser;
use print_my_card::core::card_model::CardModel;
use print_my_card::core::layout::LayoutEngine;
use print_my_card::core::manifest::ManifestBuilder;
use print_my_card::core::{ConfigProvider, FieldId};
use print_my_card::domain::ports::{QrBitmap, QrEncoder, QrOptions};
use print_my_card::utils::error::ErrorSeverity;
use print_my_card::utils::{logger, validation::Validate};
use print_my_card::{
    AppConfig, CardError, CardFile, CliConfig, ExportOrchestrator, ExportOutcome,
    HttpGenerationService, LocalStorage,
};

/// The CLI has no bitmap encoder; the preview reports the QR anchor without a bitmap.
struct NoQrEncoder;

impl QrEncoder for NoQrEncoder {
    fn encode(&self, _text: &str, _options: &QrOptions) -> print_my_card::Result<QrBitmap> {
        Err(CardError::config("no QR encoder available in the CLI"))
    }
}

fn exit_code(e: &CardError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 服務端或網路錯誤，可重試
        ErrorSeverity::High => 1,   // 配置錯誤
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: CardError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn print_preview(model: &CardModel) {
    println!(
        "Card {}x{}x{} mm, fillet {} mm, {} outline segments, color {}",
        model.profile.width,
        model.profile.height,
        model.extrusion.depth,
        model.profile.radius,
        model.profile.segments.len(),
        model.color
    );
    for text in &model.texts {
        println!(
            "  {:<9} ({:>6.1}, {:>6.1}, {:.2})  {}pt  {}",
            text.field.key(),
            text.position.x,
            text.position.y,
            text.position.z,
            text.style.font_size,
            text.text
        );
    }
    match model.layout.anchor(FieldId::QrCode).filter(|a| a.visible) {
        Some(qr) => println!(
            "  {:<9} ({:>6.1}, {:>6.1}) back face{}",
            qr.field.key(),
            qr.position.x,
            qr.position.y,
            if model.qr.is_some() { "" } else { ", no bitmap" }
        ),
        None => println!("  no QR code"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting print-my-card");

    // 載入配置
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path).unwrap_or_else(|e| fail(e))
        }
        None => AppConfig::default(),
    }
    .with_env_fallback();
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }

    let card = CardFile::from_file(&cli.card).unwrap_or_else(|e| fail(e));
    if let Err(e) = card.validate() {
        fail(e);
    }
    let snapshot = card.into_snapshot().unwrap_or_else(|e| fail(e));

    if cli.preview {
        let model = CardModel::build(&snapshot.design, &snapshot.content, &NoQrEncoder);
        print_preview(&model);
    }

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - manifest is printed, nothing is sent");
        let layout = LayoutEngine::default().compute(
            snapshot.design.width(),
            snapshot.design.height(),
            &snapshot.content,
        );
        let manifest = ManifestBuilder::new(config.app_name()).build(
            &snapshot.design,
            &snapshot.content,
            &layout,
        );
        println!("{}", manifest.to_json_pretty()?);
        return Ok(());
    }
    if cli.preview {
        return Ok(());
    }

    let service = HttpGenerationService::from_config(&config).unwrap_or_else(|e| fail(e));
    let storage = LocalStorage::new(config.output_path().to_string());
    let orchestrator = ExportOrchestrator::new(service, storage, &config);

    match orchestrator
        .generate(&snapshot.design, &snapshot.content)
        .await
    {
        Ok(ExportOutcome::Saved(saved)) => {
            println!("✅ Card generated!");
            println!("📁 Output saved to: {}", saved.location);
        }
        Ok(ExportOutcome::Ignored) => {
            println!("An export is already running");
        }
        Err(e) => fail(e),
    }

    Ok(())
}
