mod enhance;
