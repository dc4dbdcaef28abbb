use ae_triage::{
    model::{EntityCategory, MedicalEntity},
    nlp::normalize::normalize_entities,
};

#[test]
fn case_variants_collapse_to_one_entity() {
    let entities = normalize_entities(vec![
        MedicalEntity::new("Chest Pain", EntityCategory::MedicalCondition),
        MedicalEntity::new("chest pain", EntityCategory::MedicalCondition),
    ]);
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].text, "chest pain");
}

#[test]
fn first_seen_category_and_order_win() {
    let entities = normalize_entities(vec![
        MedicalEntity::new("Aspirin", EntityCategory::Medication),
        MedicalEntity::new("nausea", EntityCategory::MedicalCondition),
        MedicalEntity::new("ASPIRIN", EntityCategory::TestTreatmentProcedure),
        MedicalEntity::new("  Chest ", EntityCategory::Anatomy),
    ]);
    let texts: Vec<_> = entities.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["aspirin", "nausea", "chest"]);
    assert_eq!(entities[0].category, EntityCategory::Medication);
}

#[test]
fn blank_and_empty_input_yield_nothing() {
    assert!(normalize_entities(Vec::new()).is_empty());
    let entities = normalize_entities(vec![MedicalEntity::new("   ", EntityCategory::Anatomy)]);
    assert!(entities.is_empty());
}
