use dynamics_core::factory::global;
use dynamics_core::{EntityType, ModelFactory, TaskModel};
use serde_json::json;
use std::rc::Rc;

fn fresh_instance() -> Rc<ModelFactory> {
    ModelFactory::reset_instance();
    ModelFactory::instance()
}

#[test]
fn instance_is_created_lazily_and_shared() {
    ModelFactory::reset_instance();
    assert!(!ModelFactory::has_instance());

    let instance = ModelFactory::instance();
    assert!(ModelFactory::has_instance());

    let another = ModelFactory::instance();
    assert!(Rc::ptr_eq(&instance, &another));
}

#[test]
fn reset_produces_a_distinct_instance_and_clears_the_old_store() {
    let first = fresh_instance();
    first
        .update_object(EntityType::Task, &json!({"id": 1}))
        .expect("task stored");
    assert_eq!(first.object_count(), 1);

    ModelFactory::reset_instance();
    let second = ModelFactory::instance();

    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(second.object_count(), 0);
    assert_eq!(first.object_count(), 0);
}

#[test]
fn types_enumerates_the_registry() {
    let tags: Vec<&str> = ModelFactory::types().iter().map(|kind| kind.as_str()).collect();
    assert_eq!(tags, vec!["iteration", "story", "task"]);
}

#[test]
fn global_functions_delegate_to_the_instance() {
    let instance = fresh_instance();

    let created = global::update_object("story", &json!({"id": 465, "name": "Login"}))
        .expect("story stored through global entry point");
    let fetched = instance
        .get_object(EntityType::Story, 465)
        .expect("story visible through the instance");
    assert!(Rc::ptr_eq(&created, &fetched));

    let task = global::create_object("task").expect("task created");
    task.borrow_mut().set_id(3);
    global::add_object(&task).expect("task added");
    let fetched = global::get_object("task", 3).expect("task found");
    assert!(Rc::ptr_eq(&task, &fetched));
    assert!(fetched.borrow().is::<TaskModel>());

    assert!(global::get_object_if_exists("iteration", 1)
        .expect("valid type")
        .is_none());
    assert!(global::initialize_for("iteration", 1, Box::new(|_| {})).is_ok());
}
