use print_my_card::core::{CardContent, CardDesign, FieldId, Manifest, QrEncoder};
use print_my_card::domain::ports::{QrBitmap, QrOptions};
use print_my_card::{CardModel, CardSnapshot, CardStore, LayoutEngine, ManifestBuilder, PreviewCache};

struct CheckerEncoder;

impl QrEncoder for CheckerEncoder {
    fn encode(&self, _text: &str, options: &QrOptions) -> print_my_card::Result<QrBitmap> {
        assert_eq!(options.width, 512);
        let modules = (0..21 * 21).map(|i| (i / 21 + i % 21) % 2 == 0).collect();
        Ok(QrBitmap::new(21, modules).unwrap())
    }
}

fn build(design: &CardDesign, content: &CardContent) -> (CardModel, Manifest) {
    let model = CardModel::build(design, content, &CheckerEncoder);
    let layout = LayoutEngine::default().compute(design.width(), design.height(), content);
    let manifest = ManifestBuilder::default().build(design, content, &layout);
    (model, manifest)
}

fn manifest_xy(manifest: &Manifest, field: FieldId) -> (f64, f64) {
    let p = &manifest.positions;
    let position = match field {
        FieldId::Name => p.name,
        FieldId::JobTitle => p.job_title,
        FieldId::School => p.school,
        FieldId::Phone => p.phone,
        FieldId::Email => p.email,
        FieldId::Github => p.github,
        FieldId::Linkedin => p.linkedin,
        FieldId::QrCode => p.qr_code,
    };
    (position.x, position.y)
}

#[test]
fn test_preview_text_matches_manifest_positions() {
    for show_github in [false, true] {
        for show_linkedin in [false, true] {
            let content = CardContent {
                name: "Dean".to_string(),
                github: "github.com/dean".to_string(),
                linkedin: "linkedin.com/in/dean".to_string(),
                show_github,
                show_linkedin,
                ..Default::default()
            };
            let (model, manifest) = build(&CardDesign::default(), &content);

            for text in &model.texts {
                assert_eq!(
                    (text.position.x, text.position.y),
                    manifest_xy(&manifest, text.field),
                    "{:?} drifted between preview and manifest",
                    text.field
                );
            }
        }
    }
}

#[test]
fn test_preview_and_manifest_share_fillet() {
    let design = CardDesign::new(12.5);
    let (model, manifest) = build(&design, &CardContent::default());
    assert_eq!(model.profile.radius, manifest.design.fillet_radius);
    assert_eq!(model.extrusion.depth, manifest.design.thickness);
    assert_eq!(model.profile.width, manifest.design.dimensions.width);
}

#[test]
fn test_qr_plane_and_manifest_agree_on_back_face() {
    let content = CardContent {
        show_qr_code: true,
        qr_code_link: "https://dean.dev".to_string(),
        ..Default::default()
    };
    let (model, manifest) = build(&CardDesign::default(), &content);

    let qr = model.qr.expect("QR plane on the back face");
    assert_eq!((qr.position.x, qr.position.y), manifest_xy(&manifest, FieldId::QrCode));
    assert!(qr.position.z < 0.0);
    assert_eq!(qr.bitmap.size(), 21);
    assert_eq!(manifest.content.qr_url, "https://dean.dev");
}

#[test]
fn test_store_edits_flow_into_preview() {
    let store = CardStore::new(CardSnapshot::default());
    let mut cache = PreviewCache::new(CheckerEncoder);
    let mut rx = store.subscribe();

    store.update(|s| {
        s.content.name = "Alex Maker".to_string();
        s.content.show_linkedin = true;
        s.design.set_fillet_radius(-2.0);
    });

    tokio_test::block_on(rx.changed()).unwrap();
    let snapshot = rx.borrow_and_update().clone();
    let model = cache.model(&snapshot);

    assert_eq!(model.profile.segments.len(), 4);
    assert_eq!(model.text(FieldId::Name).unwrap().text, "Alex Maker");
    assert_eq!(model.text(FieldId::Linkedin).unwrap().position.y, -9.0);
}
