//! Message bundles.
//!
//! Templates may contain positional `{0}`, `{1}`… placeholders.

use taskboard_core::{KeyValue, MessageKey};

use crate::locale::Locale;

pub fn template(locale: Locale, key: MessageKey) -> &'static str {
    match locale {
        Locale::En => english(key),
        Locale::Fr => french(key),
    }
}

/// Localized text for `key` with `args` substituted.
pub fn render(locale: Locale, key: MessageKey, args: &[String]) -> String {
    args.iter()
        .enumerate()
        .fold(template(locale, key).to_string(), |text, (i, arg)| {
            text.replace(&format!("{{{i}}}"), arg)
        })
}

/// The whole bundle for `locale`, in key order.
pub fn bundle(locale: Locale) -> Vec<KeyValue> {
    MessageKey::ALL
        .iter()
        .map(|key| KeyValue::new(key.as_str(), template(locale, *key)))
        .collect()
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        TaskExists => "Task already exists.",
        AddTaskFailed => "Unable to add the task.",
        SaveTaskFailed => "Unable to save the task.",
        SaveParentTaskFailed => "Unable to save the parent task.",
        AddParentFailed => "Unable to add the parent task.",
        UpdateTaskEnded => "Task has ended and can no longer be updated.",
        TaskNotFoundById => "No task found with id {0}.",
        TaskNotFound => "Task not found.",
        ParentTaskNotFoundById => "No parent task found with id {0}.",
        ParentTaskNotFound => "Parent task not found.",
        PriorityRange => "Priority From must not be greater than Priority To.",
        InvalidRequest => "Invalid task details.",
        EndTaskNotFound => "No task found with id {0}.",
        InvalidTaskId => "Invalid task id.",
        InvalidDate => "Invalid date, expected dd-MM-yyyy.",
        InvalidPriority => "Invalid priority.",
        IgnoreUpdate => "Nothing to update.",
        InternalError => "Something went wrong. Please try again.",
        AddTaskSuccess => "Task added successfully.",
        UpdateTaskSuccess => "Task updated successfully.",
        LabelTask => "Task",
        LabelPriority => "Priority",
        LabelParentTask => "Parent Task",
        LabelStartDate => "Start Date",
        LabelEndDate => "End Date",
        LabelAddTask => "Add Task",
        LabelReset => "Reset",
        LabelCancel => "Cancel",
        LabelPriorityFrom => "Priority From",
        LabelPriorityTo => "Priority To",
        LabelStart => "Start",
        LabelEnd => "End",
        LabelParent => "Parent",
        LabelEdit => "Edit",
        LabelEndTask => "End Task",
        LabelNoTaskAvailable => "No task available",
        LabelUpdateTask => "Update Task",
        LabelViewTask => "View Task",
        LabelTitle => "Task Manager",
    }
}

fn french(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        TaskExists => "La tâche existe déjà.",
        AddTaskFailed => "Impossible d'ajouter la tâche.",
        SaveTaskFailed => "Impossible d'enregistrer la tâche.",
        SaveParentTaskFailed => "Impossible d'enregistrer la tâche parente.",
        AddParentFailed => "Impossible d'ajouter la tâche parente.",
        UpdateTaskEnded => "La tâche est terminée et ne peut plus être modifiée.",
        TaskNotFoundById => "Aucune tâche trouvée avec l'identifiant {0}.",
        TaskNotFound => "Tâche introuvable.",
        ParentTaskNotFoundById => "Aucune tâche parente trouvée avec l'identifiant {0}.",
        ParentTaskNotFound => "Tâche parente introuvable.",
        PriorityRange => "La priorité de début ne doit pas dépasser la priorité de fin.",
        InvalidRequest => "Détails de la tâche invalides.",
        EndTaskNotFound => "Aucune tâche trouvée avec l'identifiant {0}.",
        InvalidTaskId => "Identifiant de tâche invalide.",
        InvalidDate => "Date invalide, format attendu jj-MM-aaaa.",
        InvalidPriority => "Priorité invalide.",
        IgnoreUpdate => "Aucune modification à enregistrer.",
        InternalError => "Une erreur est survenue. Veuillez réessayer.",
        AddTaskSuccess => "Tâche ajoutée avec succès.",
        UpdateTaskSuccess => "Tâche mise à jour avec succès.",
        LabelTask => "Tâche",
        LabelPriority => "Priorité",
        LabelParentTask => "Tâche parente",
        LabelStartDate => "Date de début",
        LabelEndDate => "Date de fin",
        LabelAddTask => "Ajouter une tâche",
        LabelReset => "Réinitialiser",
        LabelCancel => "Annuler",
        LabelPriorityFrom => "Priorité de",
        LabelPriorityTo => "Priorité à",
        LabelStart => "Début",
        LabelEnd => "Fin",
        LabelParent => "Parent",
        LabelEdit => "Modifier",
        LabelEndTask => "Terminer la tâche",
        LabelNoTaskAvailable => "Aucune tâche disponible",
        LabelUpdateTask => "Modifier la tâche",
        LabelViewTask => "Voir la tâche",
        LabelTitle => "Gestionnaire de tâches",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_text_in_every_locale() {
        for locale in Locale::ALL {
            for key in MessageKey::ALL {
                assert!(!template(locale, *key).is_empty(), "{locale:?} {key}");
            }
        }
    }

    #[test]
    fn bundle_lists_every_key_in_order() {
        let en = bundle(Locale::En);
        assert_eq!(en.len(), MessageKey::ALL.len());
        assert_eq!(en[0].key, "exception.taskExist");
        assert_eq!(en[0].value, "Task already exists.");
        assert!(bundle(Locale::Fr).iter().any(|kv| kv.value == "Tâche"));
    }

    #[test]
    fn render_substitutes_positional_args() {
        let text = render(Locale::En, MessageKey::TaskNotFoundById, &["42".into()]);
        assert_eq!(text, "No task found with id 42.");
        let text = render(Locale::Fr, MessageKey::TaskNotFoundById, &["42".into()]);
        assert_eq!(text, "Aucune tâche trouvée avec l'identifiant 42.");
    }

    #[test]
    fn render_without_args_keeps_template() {
        assert_eq!(
            render(Locale::En, MessageKey::IgnoreUpdate, &[]),
            "Nothing to update."
        );
    }
}
