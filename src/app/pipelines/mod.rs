pub mod extra_paths_pipeline;
