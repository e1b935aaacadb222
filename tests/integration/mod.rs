mod stream_selection_flow;
