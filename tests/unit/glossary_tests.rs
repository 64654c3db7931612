/*!
 * Tests for the glossary store: loading, seeding, lookup, substitution,
 * and synchronous persistence.
 */

use omuvunuzi::glossary::GlossaryStore;
use tempfile::tempdir;

#[test]
fn test_glossaryStore_load_withMissingFile_shouldSeedDefaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");

    let glossary = GlossaryStore::load(&path);

    assert_eq!(glossary.len(), 5);
    assert_eq!(glossary.get("thank you"), Some("webare".to_string()));
    // Seeding persists immediately
    assert!(path.exists());
}

#[test]
fn test_glossaryStore_load_withCorruptFile_shouldFallBackToEmpty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");
    std::fs::write(&path, "this is { not json").unwrap();

    let glossary = GlossaryStore::load(&path);

    assert!(glossary.is_empty());
}

#[test]
fn test_glossaryStore_check_withExactMatchAnyCasing_shouldReturnValue() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));
    glossary.add("thank you", "webale").unwrap();

    assert_eq!(glossary.check("thank you"), "webale");
    assert_eq!(glossary.check("THANK YOU"), "webale");
    assert_eq!(glossary.check("  Thank You  "), "webale");
}

#[test]
fn test_glossaryStore_check_withWholeWordMatch_shouldSubstituteCaseInsensitively() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));
    glossary.add("hello", "oraire gye").unwrap();

    assert_eq!(glossary.check("Hello, my friend"), "oraire gye, my friend");
}

#[test]
fn test_glossaryStore_check_withSubstringInsideWord_shouldNotSubstitute() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));
    glossary.add("hell", "x").unwrap();

    // "hello" contains "hell" but not as a whole word
    assert_eq!(glossary.check("say hello"), "say hello");
}

#[test]
fn test_glossaryStore_check_withNoMatch_shouldReturnInputUnchanged() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));
    glossary.add("hello", "oraire gye").unwrap();

    let input = "completely unrelated text";
    assert_eq!(glossary.check(input), input);
}

#[test]
fn test_glossaryStore_check_withMultiWordPhrase_shouldSubstituteWholePhrase() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));
    glossary.add("good morning", "oraire gye").unwrap();

    assert_eq!(
        glossary.check("I said good morning to her"),
        "I said oraire gye to her"
    );
}

#[test]
fn test_glossaryStore_addAndReload_shouldRoundTripThroughFile() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");

    let glossary = GlossaryStore::empty(&path);
    glossary.add("hello", "oraire gye").unwrap();

    let reloaded = GlossaryStore::load(&path);
    assert_eq!(reloaded.get("hello"), Some("oraire gye".to_string()));
}

#[test]
fn test_glossaryStore_add_shouldNormalizeKey() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));
    glossary.add("  Thank You ", "webale").unwrap();

    assert_eq!(glossary.get("thank you"), Some("webale".to_string()));
}

#[test]
fn test_glossaryStore_add_withEmptyField_shouldBeNoOp() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));

    glossary.add("", "webale").unwrap();
    glossary.add("thanks", "   ").unwrap();

    assert!(glossary.is_empty());
}

#[test]
fn test_glossaryStore_remove_shouldDeleteAndPersist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");

    let glossary = GlossaryStore::empty(&path);
    glossary.add("hello", "oraire gye").unwrap();

    assert!(glossary.remove("hello").unwrap());
    assert!(!glossary.remove("hello").unwrap());

    let reloaded = GlossaryStore::load(&path);
    assert_eq!(reloaded.get("hello"), None);
}

#[test]
fn test_glossaryStore_entries_shouldBeSortedForDisplay() {
    let dir = tempdir().unwrap();
    let glossary = GlossaryStore::empty(dir.path().join("glossary.json"));
    glossary.add("welcome", "twakwakiira").unwrap();
    glossary.add("hello", "oraire gye").unwrap();

    let entries = glossary.entries();
    assert_eq!(entries[0].0, "hello");
    assert_eq!(entries[1].0, "welcome");
}
