use speculate2::speculate;
use taskdeck::catalog::Catalog;
use taskdeck::codec;
use taskdeck::models::{ProjectKind, Task, TaskKind};

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::with_capacity(10);
    catalog
        .create_project(1, "Launch", ProjectKind::Large)
        .expect("Failed to create project");
    let project = catalog.project_mut(1).expect("Project missing");
    project
        .add_task(Task::new(1, "Design", TaskKind::Admin, 10))
        .expect("Failed to add task");
    let mut build = Task::new(2, "Build", TaskKind::Logistics, 40);
    build.completed = true;
    project.add_task(build).expect("Failed to add task");
    catalog
        .create_project(2, "Support desk", ProjectKind::Small)
        .expect("Failed to create project");
    catalog
        .project_mut(2)
        .expect("Project missing")
        .add_task(Task::new(7, "Triage", TaskKind::Support, 5))
        .expect("Failed to add task");
    catalog
}

speculate! {
    describe "serialize" {
        it "emits one project line followed by its task lines" {
            let text = codec::serialize(&sample_catalog());

            assert_eq!(
                text,
                "1,Launch,Large\n\
                 1,Design,A,10,false\n\
                 2,Build,L,40,true\n\
                 2,Support desk,Small\n\
                 7,Triage,S,5,false\n"
            );
        }

        it "renders an empty catalog as empty text" {
            assert_eq!(codec::serialize(&Catalog::new()), "");
        }
    }

    describe "deserialize" {
        it "round-trips a catalog built through valid operations" {
            let original = sample_catalog();

            let loaded = codec::deserialize(&codec::serialize(&original), original.capacity());

            assert!(loaded.warnings.is_empty());
            assert_eq!(loaded.catalog, original);
        }

        it "skips blank lines without warnings" {
            let loaded = codec::deserialize("\n\n1,Launch,Small\n\n", 10);

            assert!(loaded.warnings.is_empty());
            assert_eq!(loaded.catalog.len(), 1);
        }

        it "reports a task line before any project line as out of place" {
            let loaded = codec::deserialize("1,Design,A,10,false\n", 10);

            assert!(loaded.catalog.is_empty());
            assert_eq!(loaded.warnings.len(), 1);
            assert_eq!(loaded.warnings[0].line, 1);
            assert!(loaded.warnings[0].message.contains("no preceding project"));
        }

        it "skips a project line with an out-of-range id" {
            let loaded = codec::deserialize("1000,Too big,Small\n", 10);

            assert!(loaded.catalog.is_empty());
            assert!(loaded.warnings[0].message.contains("invalid project ID"));
        }

        it "skips a project line with an unknown type" {
            let loaded = codec::deserialize("1,Launch,Gigantic\n", 10);

            assert!(loaded.catalog.is_empty());
            assert!(loaded.warnings[0].message.contains("invalid project type"));
        }

        it "does not attach tasks of a rejected project to the previous one" {
            let text = "1,Launch,Small\n\
                        1000,Broken,Small\n\
                        9,Orphan,A,10,false\n";

            let loaded = codec::deserialize(text, 10);

            let launch = loaded.catalog.project(1).expect("Project missing");
            assert!(launch.tasks().is_empty());
            assert_eq!(loaded.warnings.len(), 2);
            assert!(loaded.warnings[1].message.contains("no preceding project"));
        }

        it "drops projects beyond the configured capacity but keeps scanning" {
            let text = "1,First,Small\n\
                        2,Second,Small\n\
                        9,Dropped task,A,10,false\n\
                        3,Third,Small\n";

            let loaded = codec::deserialize(text, 1);

            assert_eq!(loaded.catalog.len(), 1);
            assert!(loaded.catalog.project(1).is_some());
            // The dropped project, its orphaned task, and the third project.
            assert_eq!(loaded.warnings.len(), 3);
        }

        it "rejects a duplicate project id" {
            let loaded = codec::deserialize("1,First,Small\n1,Again,Small\n", 10);

            assert_eq!(loaded.catalog.len(), 1);
            assert_eq!(loaded.catalog.project(1).expect("missing").name(), "First");
            assert!(loaded.warnings[0].message.contains("already exists"));
        }

        it "validates every task field" {
            let text = "1,Launch,Large\n\
                        0,Bad id,A,10,false\n\
                        2,,A,10,false\n\
                        3,Bad type,Q,10,false\n\
                        4,Bad duration,A,500,false\n\
                        5,Good,A,10,true\n";

            let loaded = codec::deserialize(text, 10);

            let project = loaded.catalog.project(1).expect("Project missing");
            assert_eq!(project.tasks().len(), 1);
            assert_eq!(project.tasks()[0].id, 5);
            assert!(project.tasks()[0].completed);
            assert_eq!(loaded.warnings.len(), 4);
            assert!(loaded.warnings[0].message.contains("invalid task ID"));
            assert!(loaded.warnings[1].message.contains("empty description"));
            assert!(loaded.warnings[2].message.contains("invalid task type"));
            assert!(loaded.warnings[3].message.contains("invalid task duration"));
        }

        it "rejects a duplicate task id within a project" {
            let text = "1,Launch,Large\n\
                        5,First,A,10,false\n\
                        5,Second,S,20,false\n";

            let loaded = codec::deserialize(text, 10);

            let project = loaded.catalog.project(1).expect("Project missing");
            assert_eq!(project.tasks().len(), 1);
            assert_eq!(project.tasks()[0].description, "First");
            assert!(loaded.warnings[0].message.contains("already exists"));
        }

        it "skips task lines once the project has no room" {
            let text = "1,Tiny,Small\n\
                        1,Fits,A,10,false\n\
                        2,Overflow,A,10,false\n";

            let loaded = codec::deserialize(text, 10);

            let project = loaded.catalog.project(1).expect("Project missing");
            assert_eq!(project.tasks().len(), 1);
            assert!(loaded.warnings[0].message.contains("maximum"));
        }

        it "reports lines with the wrong field count as malformed" {
            let loaded = codec::deserialize("1,Launch\n1,Launch,Small,extra\n", 10);

            assert!(loaded.catalog.is_empty());
            assert_eq!(loaded.warnings.len(), 2);
            assert!(loaded.warnings.iter().all(|w| w.message.contains("malformed")));
        }

        it "accepts lowercase task type letters and completion flags" {
            let text = "1,Launch,Large\n1,Design,a,10,TRUE\n";

            let loaded = codec::deserialize(text, 10);

            let task = &loaded.catalog.project(1).expect("missing").tasks()[0];
            assert_eq!(task.kind, TaskKind::Admin);
            assert!(task.completed);
        }
    }

    describe "file round trips" {
        it "saves and reloads a populated catalog" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("ProjectData.txt");
            let original = sample_catalog();

            codec::save(&path, &original).expect("Failed to save");
            let loaded = codec::load(&path, original.capacity()).expect("Failed to load");

            assert!(loaded.warnings.is_empty());
            assert_eq!(loaded.catalog, original);
        }

        it "saves and reloads an empty catalog without warnings" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("empty.txt");

            codec::save(&path, &Catalog::new()).expect("Failed to save");
            let loaded = codec::load(&path, Catalog::DEFAULT_CAPACITY).expect("Failed to load");

            assert!(loaded.warnings.is_empty());
            assert!(loaded.catalog.is_empty());
        }

        it "replaces an existing file on save" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("ProjectData.txt");

            codec::save(&path, &sample_catalog()).expect("Failed to save");
            codec::save(&path, &Catalog::new()).expect("Failed to save again");

            let loaded = codec::load(&path, 10).expect("Failed to load");
            assert!(loaded.catalog.is_empty());
        }

        it "reports a missing file as unavailable" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nope.txt");

            let err = codec::load(&path, 10).unwrap_err();

            assert!(matches!(err, codec::CodecError::FileUnavailable(_)));
        }
    }
}
